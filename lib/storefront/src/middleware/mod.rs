//! Tower middleware used by [`HyperClient`](crate::HyperClient).
//!
//! - [`CredentialsLayer`] adds `Authorization: Bearer <token>` and `X-User-Id` from the session.
//! - [`LoggingLayer`] logs each exchange with `tracing`.
//!
//! Both are enabled through [`HyperClientBuilder`](crate::HyperClientBuilder):
//!
//! ```ignore
//! use storefront::{HyperClient, SessionStore};
//!
//! let session = SessionStore::new();
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .with_credentials(session.clone())
//!     .build();
//! ```

mod credentials;
mod logging;

pub use credentials::{
    AUTHORIZATION_HEADER, Credentials, CredentialsLayer, USER_ID_HEADER, inject_credentials,
};
pub use logging::{Logging, LoggingLayer};
