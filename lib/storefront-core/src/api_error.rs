//! Normalized API errors.
//!
//! Every failed call surfaces as an [`ApiError`], whether the server answered
//! with an error body or no response arrived at all. Callers tell the cases
//! apart through [`ApiError::has_details`], [`ApiError::error_codes`] and
//! [`ApiError::field_errors`], not through the error's type.
//!
//! A typical server error body looks like:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Validation failed",
//!   "errors": [
//!     { "field": "email", "message": "invalid", "errorCode": "INVALID_EMAIL" }
//!   ]
//! }
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when an error body carries no `message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message used when the request never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// One entry of the server's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    /// Input field the entry refers to; `None` for general errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ErrorEntry {
    /// Entry bound to an input field.
    #[must_use]
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: Some(message.into()),
            error_code: None,
        }
    }

    /// Entry not bound to any field.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: Some(message.into()),
            error_code: None,
        }
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Read an entry leniently: missing, empty or non-textual members become `None`.
    fn from_json(value: &Value) -> Self {
        Self {
            field: text(value.get("field")),
            message: text(value.get("message")),
            error_code: text(value.get("errorCode")),
        }
    }

    fn is_field_error(&self) -> bool {
        self.field.is_some()
    }
}

/// Non-empty string, or a number rendered as text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Uniform error returned by every `ApiClient` operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct ApiError {
    message: String,
    success: Option<bool>,
    errors: Vec<ErrorEntry>,
    field_errors: Option<String>,
    general_errors: Option<String>,
    detailed_message: Option<String>,
    error_codes: Vec<String>,
    status: Option<u16>,
    cause: Option<String>,
}

impl ApiError {
    /// Normalize a parsed error body.
    ///
    /// `value` is the body as the server sent it; anything other than a JSON
    /// object is treated as an object with no recognised members.
    #[must_use]
    pub fn from_body(status: Option<u16>, value: &Value) -> Self {
        let server_message = text(value.get("message"));
        let success = value.get("success").and_then(Value::as_bool);
        let errors: Vec<ErrorEntry> = value
            .get("errors")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(ErrorEntry::from_json).collect())
            .unwrap_or_default();

        let error_codes = errors
            .iter()
            .filter_map(|entry| entry.error_code.clone())
            .collect();

        let mut error = Self {
            message: server_message
                .clone()
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            success,
            errors,
            field_errors: None,
            general_errors: None,
            detailed_message: None,
            error_codes,
            status,
            cause: None,
        };

        if error.has_details() {
            let (field_entries, general_entries): (Vec<&ErrorEntry>, Vec<&ErrorEntry>) =
                error.errors.iter().partition(|entry| entry.is_field_error());

            let field_errors = field_entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}: {}",
                        entry.field.as_deref().unwrap_or_default(),
                        entry.message.as_deref().unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");

            let general_errors = general_entries
                .iter()
                .filter_map(|entry| entry.message.as_deref())
                .collect::<Vec<_>>()
                .join(", ");

            error.detailed_message = Some(compose_detailed_message(
                server_message.as_deref(),
                &field_errors,
                &general_errors,
            ));
            error.field_errors = Some(field_errors);
            error.general_errors = Some(general_errors);
        }

        error
    }

    /// Normalize raw error body bytes.
    ///
    /// Bytes that are not JSON are treated like a body without members. An
    /// empty body or a literal `null` is treated as no body at all.
    #[must_use]
    pub fn from_body_bytes(status: u16, body: &[u8]) -> Option<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Null) => None,
            Ok(value) => Some(Self::from_body(Some(status), &value)),
            Err(_) => Some(Self::from_body(Some(status), &Value::Null)),
        }
    }

    /// Error for a request that never received a response.
    #[must_use]
    pub fn network(cause: impl Into<String>) -> Self {
        Self::without_body(NETWORK_ERROR_MESSAGE, None, Some(cause.into()))
    }

    fn without_body(message: impl Into<String>, status: Option<u16>, cause: Option<String>) -> Self {
        Self {
            message: message.into(),
            success: Some(false),
            errors: Vec::new(),
            field_errors: None,
            general_errors: None,
            detailed_message: None,
            error_codes: Vec::new(),
            status,
            cause,
        }
    }

    fn with_cause(mut self, cause: String) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Top-level message, never empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `success` flag copied from the body, `Some(false)` when there was no body.
    #[must_use]
    pub const fn success(&self) -> Option<bool> {
        self.success
    }

    /// Error entries in server order.
    #[must_use]
    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    /// `true` if and only if [`errors`](Self::errors) is non-empty.
    #[must_use]
    pub fn has_details(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `"field: message"` pairs joined by `", "`. Set only when there are details.
    #[must_use]
    pub fn field_errors(&self) -> Option<&str> {
        self.field_errors.as_deref()
    }

    /// Messages of entries without a field, joined by `", "`. Set only when there are details.
    #[must_use]
    pub fn general_errors(&self) -> Option<&str> {
        self.general_errors.as_deref()
    }

    /// Summary combining the message with field and general errors.
    #[must_use]
    pub fn detailed_message(&self) -> Option<&str> {
        self.detailed_message.as_deref()
    }

    /// Best text to show a user: the detailed message when present, the message otherwise.
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.detailed_message
            .as_deref()
            .filter(|detailed| !detailed.is_empty())
            .unwrap_or(&self.message)
    }

    /// Non-empty error codes in entry order, duplicates kept.
    #[must_use]
    pub fn error_codes(&self) -> &[String] {
        &self.error_codes
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Underlying transport error text, for logs.
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Returns `true` if the server rejected the session (401 or 403).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }
}

/// Join the server message, field errors and general errors with `". "`.
///
/// General errors are left out when the server message already contains them.
fn compose_detailed_message(
    server_message: Option<&str>,
    field_errors: &str,
    general_errors: &str,
) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(message) = server_message {
        parts.push(message.to_string());
    }
    if !field_errors.is_empty() {
        parts.push(format!("Field errors: {field_errors}"));
    }
    let repeated = server_message.is_some_and(|message| message.contains(general_errors));
    if !general_errors.is_empty() && !repeated {
        parts.push(general_errors.to_string());
    }
    parts.join(". ")
}

impl From<crate::Error> for ApiError {
    fn from(error: crate::Error) -> Self {
        let cause = error.to_string();
        match error {
            crate::Error::Http {
                status,
                reason,
                body,
            } => match Self::from_body_bytes(status, &body) {
                Some(normalized) => normalized.with_cause(cause),
                None => Self::without_body(reason, Some(status), Some(cause)),
            },
            err if err.is_network() => Self::network(cause),
            _ => Self::without_body(cause.clone(), None, Some(cause)),
        }
    }
}
