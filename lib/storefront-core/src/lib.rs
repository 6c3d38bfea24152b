//! Core types for the storefront API client.
//!
//! Transport-independent pieces shared by `storefront` and by test fakes:
//! - [`Request`], [`Response`] and the [`HttpClient`] seam
//! - [`Error`], what the transport reports
//! - [`ApiError`] and [`ErrorEntry`], what callers receive
//! - [`Payload`], a successful body, enveloped or raw
//! - [`CredentialProvider`], read access to the current session

mod api_error;
mod body;
mod client;
mod credentials;
mod error;
mod payload;
pub mod prelude;
mod request;
mod response;

pub use api_error::{ApiError, DEFAULT_ERROR_MESSAGE, ErrorEntry, NETWORK_ERROR_MESSAGE};
pub use body::{APPLICATION_JSON, CONTENT_TYPE, from_value, to_json, to_query_string};
pub use client::HttpClient;
pub use credentials::{CredentialProvider, NoCredentials, StaticCredentials};
pub use error::{Error, Result};
pub use http::Method;
pub use payload::{Payload, SUCCESS_KEY};
pub use request::{Request, RequestBuilder};
pub use response::Response;
