//! Request logging with `tracing`.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED: &str = "<redacted>";

/// Layer that wraps each exchange in a `storefront_request` span.
///
/// Completion is logged at `info` for 2xx and `warn` otherwise. With
/// [`with_headers`](Self::with_headers) the outgoing headers are also
/// logged at `debug`, with `Authorization` masked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingLayer {
    headers: bool,
}

impl LoggingLayer {
    /// Summary logging only.
    #[must_use]
    pub const fn new() -> Self {
        Self { headers: false }
    }

    /// Also log request headers.
    #[must_use]
    pub const fn with_headers(mut self) -> Self {
        self.headers = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            headers: self.headers,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    headers: bool,
}

fn redacted_headers(request: &Request) -> BTreeMap<&str, &str> {
    request
        .headers()
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                (name.as_str(), REDACTED)
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

fn log_outcome(result: &Result<Response>, elapsed: Duration) {
    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    match result {
        Ok(response) if response.is_success() => {
            info!(status = response.status(), elapsed_ms, "request completed");
        }
        Ok(response) => {
            warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
        }
        Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
    }
}

impl<S> Service<Request> for Logging<S>
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

    fn call(&mut self, request: Request) -> Self::Future {
        let span = info_span!(
            "storefront_request",
            method = %request.method(),
            path = request.url().path(),
        );
        span.in_scope(|| {
            if self.headers {
                debug!(url = %request.url(), headers = ?redacted_headers(&request), "sending request");
            } else {
                debug!("sending request");
            }
        });

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                log_outcome(&result, start.elapsed());
                result
            }
            .instrument(span),
        )
    }
}
