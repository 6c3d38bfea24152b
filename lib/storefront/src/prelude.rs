//! Prelude module for convenient imports.
//!
//! ```ignore
//! use storefront::prelude::*;
//! ```

pub use crate::{
    ApiClient, ApiError, ApiResult, CredentialProvider, DEFAULT_BASE_URL, HttpClient, HyperClient,
    PasswordChangeForm, Payload, SessionStore,
};
pub use serde::{Deserialize, Serialize};
