//! Prelude module for convenient imports.
//!
//! ```ignore
//! use storefront_core::prelude::*;
//! ```

pub use crate::{
    ApiError, CredentialProvider, Error, ErrorEntry, HttpClient, Method, Payload, Request,
    Response, Result,
};
