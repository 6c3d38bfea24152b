//! Transport-level errors.
//!
//! [`Error`] describes what went wrong while sending a request or reading its
//! response. It never reaches `ApiClient` callers directly: the pipeline turns
//! it into an [`ApiError`](crate::ApiError).

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Error raised by the transport and the body codecs.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[display("HTTP error {status}: {reason}")]
    Http {
        /// Status code.
        status: u16,
        /// Canonical reason phrase for `status`.
        reason: String,
        /// Raw error body, possibly empty.
        #[error(not(source))]
        body: Bytes,
    },

    /// No connection could be established or it broke mid-exchange.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS handshake or certificate failure.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// No complete response within the configured timeout.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into a valid HTTP message.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// A request body could not be encoded.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// A response body did not match the expected type.
    #[display("JSON deserialization error at '{path}': {message}")]
    JsonDeserialization {
        /// Path to the failing field (e.g. `data.category.id`).
        path: String,
        /// What went wrong at `path`.
        message: String,
    },

    /// Query parameters could not be encoded.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// A path did not resolve to a valid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP error for `status`, keeping the body for normalization.
    ///
    /// Unknown codes get the reason `"Unknown Status"`.
    #[must_use]
    pub fn from_status(status: u16, body: Bytes) -> Self {
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        Self::Http {
            status,
            reason: reason.to_string(),
            body,
        }
    }

    /// Connection failure.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// TLS failure.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Request that cannot be sent as built.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Body decoding failure at `path`.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if no response was received at all.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }
}
