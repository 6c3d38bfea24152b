//! Async client for the storefront REST API.
//!
//! Every call goes through one pipeline: credentials from the session are
//! attached, the response body is passed through as-is on success, and any
//! failure is normalized into an [`ApiError`].
//!
//! # Example
//!
//! ```ignore
//! use serde_json::Value;
//! use storefront::{ApiClient, DEFAULT_BASE_URL, HyperClient, SessionStore};
//!
//! let session = SessionStore::new();
//! let api = ApiClient::new(HyperClient::new(), DEFAULT_BASE_URL)?
//!     .with_credentials(session.clone());
//!
//! match api.products().get_by_id::<Value>(42).await {
//!     Ok(product) => println!("{product}"),
//!     Err(err) => eprintln!("{}", err.display_message()),
//! }
//! ```

mod api_client;
mod client;
mod config;
mod connector;
pub mod middleware;
mod password;
pub mod prelude;
pub mod resources;
mod session;

// Re-export client types
pub use api_client::{ApiClient, ApiRequest, ApiResult};
pub use client::{HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use password::{
    MIN_PASSWORD_LENGTH, PasswordChange, PasswordChangeForm, PasswordError, PasswordStrength,
};
pub use session::{SessionError, SessionState, SessionStore};

// Re-export core types
pub use storefront_core::{
    APPLICATION_JSON, ApiError, CONTENT_TYPE, CredentialProvider, DEFAULT_ERROR_MESSAGE, Error,
    ErrorEntry, HttpClient, Method, NETWORK_ERROR_MESSAGE, NoCredentials, Payload, Request,
    RequestBuilder, Response, Result, SUCCESS_KEY, StaticCredentials, from_value, to_json,
    to_query_string,
};

pub use url;
