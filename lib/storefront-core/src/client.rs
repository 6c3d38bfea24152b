//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between the API pipeline and the transport.
//! The `storefront` crate implements it over hyper; tests implement it with
//! in-memory fakes.

use std::future::Future;

use crate::{Request, Response, Result};

/// Sends one request and reads the whole response.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; only failures to obtain a response are errors.
pub trait HttpClient: Send + Sync {
    /// Send `request` once.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete response was received or the request
    /// could not be sent as built.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
