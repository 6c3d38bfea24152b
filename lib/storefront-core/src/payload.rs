//! Successful response bodies.
//!
//! The storefront backend wraps most responses in an envelope such as
//! `{"success": true, "message": "...", "data": {...}}`, but some endpoints
//! return a bare value. [`Payload`] records which of the two shapes arrived
//! without altering the body.

use bytes::Bytes;
use serde_json::Value;

/// Discriminator key that marks a body as an envelope.
pub const SUCCESS_KEY: &str = "success";

/// Body of a successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON object carrying a `success` key, kept whole.
    Envelope(Value),
    /// Any other body: bare objects, arrays, scalars, text, or `null` when empty.
    Raw(Value),
}

impl Payload {
    /// Classify a JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let enveloped = value
            .as_object()
            .is_some_and(|object| object.contains_key(SUCCESS_KEY));
        if enveloped {
            Self::Envelope(value)
        } else {
            Self::Raw(value)
        }
    }

    /// Classify raw body bytes.
    ///
    /// An empty body becomes `null`; a body that is not JSON is kept as a
    /// JSON string (lossily decoded as UTF-8).
    #[must_use]
    pub fn from_body(body: &Bytes) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::Raw(Value::Null);
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::Raw(Value::String(String::from_utf8_lossy(body).into_owned())),
        }
    }

    /// Returns `true` for the envelope variant.
    #[must_use]
    pub const fn is_envelope(&self) -> bool {
        matches!(self, Self::Envelope(_))
    }

    /// Borrow the body.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Envelope(value) | Self::Raw(value) => value,
        }
    }

    /// Take the body, unchanged.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Envelope(value) | Self::Raw(value) => value,
        }
    }

    /// The envelope's `success` flag, if this is an envelope holding a boolean.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        match self {
            Self::Envelope(value) => value.get(SUCCESS_KEY).and_then(Value::as_bool),
            Self::Raw(_) => None,
        }
    }

    /// The envelope's `data` member. `None` for raw payloads.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Envelope(value) => value.get("data"),
            Self::Raw(_) => None,
        }
    }

    /// Decode the whole body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error with the failing field path.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> crate::Result<T> {
        crate::from_value(self.into_value())
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;

    #[test]
    fn success_key_marks_envelope() {
        let body = json!({"success": true, "data": {"id": 5}});
        let payload = Payload::from_value(body.clone());

        check!(payload.is_envelope());
        check!(payload.success() == Some(true));
        let data = json!({"id": 5});
        check!(payload.data() == Some(&data));
        check!(payload.into_value() == body);
    }

    #[test]
    fn success_key_with_non_boolean_value_is_still_envelope() {
        let payload = Payload::from_value(json!({"success": "yes"}));
        check!(payload.is_envelope());
        check!(payload.success().is_none());
    }

    #[test]
    fn object_without_success_key_is_raw() {
        let body = json!({"id": 5, "name": "Widget"});
        let payload = Payload::from_value(body.clone());

        check!(!payload.is_envelope());
        check!(payload.data().is_none());
        check!(payload.into_value() == body);
    }

    #[test]
    fn arrays_and_scalars_are_raw() {
        check!(!Payload::from_value(json!([{"success": true}])).is_envelope());
        check!(!Payload::from_value(json!(42)).is_envelope());
    }

    #[test]
    fn empty_body_is_null() {
        check!(Payload::from_body(&Bytes::new()) == Payload::Raw(Value::Null));
        check!(Payload::from_body(&Bytes::from_static(b"  \n")) == Payload::Raw(Value::Null));
    }

    #[test]
    fn text_body_is_kept_as_string() {
        let payload = Payload::from_body(&Bytes::from_static(b"pong"));
        check!(payload == Payload::Raw(json!("pong")));
    }

    #[test]
    fn decode_whole_envelope() {
        #[derive(Debug, serde::Deserialize)]
        struct Envelope {
            success: bool,
            data: u64,
        }

        let payload = Payload::from_body(&Bytes::from_static(br#"{"success":true,"data":12}"#));
        let envelope: Envelope = payload.decode().expect("decode");
        check!(envelope.success);
        check!(envelope.data == 12);
    }
}
