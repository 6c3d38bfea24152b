//! hyper-based transport.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use storefront_core::{CredentialProvider, HttpClient};
use tower::util::BoxCloneSyncService;
use tower::{Layer, ServiceExt, service_fn};
use tracing::trace;

use crate::{
    Error, Request, Response, Result,
    config::ClientConfig,
    connector::https_connector,
    middleware::{CredentialsLayer, LoggingLayer},
};

type Stack = BoxCloneSyncService<Request, Response, Error>;

/// Pooled hyper client plus the exchange timeout.
#[derive(Clone)]
struct Transport {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl Transport {
    fn new(config: ClientConfig) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.idle_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build(https_connector(config.connect_timeout));
        Self { client, config }
    }

    async fn send(self, request: Request) -> Result<Response> {
        let request = into_hyper(request)?;
        tokio::time::timeout(self.config.timeout, self.exchange(request))
            .await
            .map_err(|_| Error::Timeout)?
    }

    /// Send and buffer the whole body; both count against the timeout.
    async fn exchange(&self, request: http::Request<Full<Bytes>>) -> Result<Response> {
        let response = self.client.request(request).await.map_err(classify)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| Error::connection(describe(&err)))?
            .to_bytes();

        trace!(status, bytes = body.len(), "response body read");
        Ok(Response::new(status, headers, body))
    }
}

fn into_hyper(request: Request) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();
    let builder = headers.iter().fold(
        http::Request::builder().method(method).uri(url.as_str()),
        |builder, (name, value)| builder.header(name, value),
    );
    builder
        .body(body.map_or_else(Full::default, Full::new))
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Error text including every cause, outermost first.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Returns `true` if a rustls error appears anywhere in the cause chain.
fn caused_by_tls(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(cause) = current {
        if cause.is::<rustls::Error>() {
            return true;
        }
        // io::Error hides its payload from `source()`.
        if let Some(io) = cause.downcast_ref::<std::io::Error>()
            && io.get_ref().is_some_and(|inner| inner.is::<rustls::Error>())
        {
            return true;
        }
        current = cause.source();
    }
    false
}

#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let message = describe(&err);
    if caused_by_tls(&err) {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

/// [`HttpClient`] backed by a pooled hyper client.
///
/// Cloning is cheap; clones share the connection pool. `http` and `https`
/// URLs are both accepted.
#[derive(Clone)]
pub struct HyperClient {
    stack: Stack,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient").finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with default settings and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with the given settings and no middleware.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.stack.clone().oneshot(request).await
    }
}

/// Builder for [`HyperClient`].
///
/// Credentials are injected before the logging layer sees the request, so
/// header logging shows `Authorization` redacted rather than missing.
#[derive(Debug, Default)]
pub struct HyperClientBuilder {
    config: ClientConfig,
    credentials: Option<CredentialsLayer>,
    logging: Option<LoggingLayer>,
}

impl HyperClientBuilder {
    /// Replace all transport settings.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the exchange timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Inject credentials from `provider` into every request.
    ///
    /// For sharing one transport outside an [`ApiClient`](crate::ApiClient);
    /// `ApiClient::with_credentials` covers the pipeline itself.
    #[must_use]
    pub fn with_credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(CredentialsLayer::from_shared(Arc::new(provider)));
        self
    }

    /// Log each exchange.
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::new());
        self
    }

    /// Log each exchange and its request headers.
    #[must_use]
    pub fn with_debug_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::new().with_headers());
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let transport = Transport::new(self.config);
        let mut stack = Stack::new(service_fn(move |request| transport.clone().send(request)));

        if let Some(logging) = self.logging {
            stack = Stack::new(logging.layer(stack));
        }
        if let Some(credentials) = self.credentials {
            stack = Stack::new(credentials.layer(stack));
        }

        HyperClient { stack }
    }
}
