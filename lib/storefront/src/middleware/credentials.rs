//! Session credential middleware.
//!
//! Adds `Authorization: Bearer <token>` and `X-User-Id: <id>` to outgoing
//! requests, reading the session afresh for every request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::HeaderValue;
use storefront_core::CredentialProvider;
use tower::{Layer, Service};
use tracing::warn;

use crate::{Error, Request, Response, Result};

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header carrying the logged-in user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Attach the current session's credentials to a request.
///
/// Each header is added only when the provider has a value for it; an
/// existing header of the same name is replaced. A value that cannot be sent
/// as a header (control characters, non-visible bytes) is skipped with a
/// warning, so the rest of the request still goes out. Nothing else in the
/// request changes.
pub fn inject_credentials<P>(request: &mut Request, provider: &P)
where
    P: CredentialProvider + ?Sized,
{
    if let Some(token) = provider.token() {
        set_if_valid(request, AUTHORIZATION_HEADER, format!("Bearer {token}"));
    }
    if let Some(user_id) = provider.user_id() {
        set_if_valid(request, USER_ID_HEADER, user_id);
    }
}

fn set_if_valid(request: &mut Request, name: &'static str, value: String) {
    if HeaderValue::from_str(&value).is_ok() {
        request.set_header(name, value);
    } else {
        // The value itself is a credential and stays out of the log.
        warn!(header = name, "stored credential is not a valid header value, header skipped");
    }
}

/// Layer that injects session credentials into requests.
#[derive(Clone)]
pub struct CredentialsLayer {
    provider: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for CredentialsLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsLayer").finish_non_exhaustive()
    }
}

impl CredentialsLayer {
    /// Create a layer reading from the given provider.
    pub fn new(provider: impl CredentialProvider + 'static) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Create a layer from an already shared provider.
    #[must_use]
    pub fn from_shared(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }
}

impl<S> Layer<S> for CredentialsLayer {
    type Service = Credentials<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Credentials {
            inner,
            provider: Arc::clone(&self.provider),
        }
    }
}

/// Service produced by [`CredentialsLayer`].
#[derive(Clone)]
pub struct Credentials<S> {
    inner: S,
    provider: Arc<dyn CredentialProvider>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for Credentials<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request> for Credentials<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        inject_credentials(&mut request, self.provider.as_ref());

        // Take the service that was polled ready and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}
