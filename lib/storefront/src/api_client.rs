//! The storefront API pipeline.
//!
//! [`ApiClient`] wraps any [`HttpClient`] with a base URL and a
//! [`CredentialProvider`]. Every call goes through the same stages:
//!
//! 1. the path is resolved under the base URL and `Content-Type: application/json` is set;
//! 2. session credentials are injected ([`inject_credentials`]);
//! 3. the request is sent once, without retries;
//! 4. a 2xx body is returned as a [`Payload`], anything else becomes an [`ApiError`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_core::{
    APPLICATION_JSON, ApiError, CONTENT_TYPE, CredentialProvider, HttpClient, Method,
    NoCredentials, Payload, Request, RequestBuilder,
};
use tracing::{debug, warn};
use url::Url;

use crate::Error;
use crate::middleware::inject_credentials;

/// Result of a pipeline call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client for the storefront REST API.
///
/// # Example
///
/// ```ignore
/// use storefront::{ApiClient, HyperClient, SessionStore, DEFAULT_BASE_URL};
///
/// let session = SessionStore::new();
/// let api = ApiClient::new(HyperClient::new(), DEFAULT_BASE_URL)?
///     .with_credentials(session.clone());
///
/// let product: serde_json::Value = api.products().get_by_id(5).await?;
/// ```
pub struct ApiClient<C> {
    client: C,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl<C: Clone> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<C> ApiClient<C> {
    /// Create an anonymous API client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> crate::Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        Ok(Self::with_url(client, base_url))
    }

    /// Create an anonymous API client with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, mut base_url: Url) -> Self {
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            credentials: Arc::new(NoCredentials),
        }
    }

    /// Read credentials from `provider` on every request.
    #[must_use]
    pub fn with_credentials(self, provider: impl CredentialProvider + 'static) -> Self {
        self.with_shared_credentials(Arc::new(provider))
    }

    /// Read credentials from an already shared provider.
    #[must_use]
    pub fn with_shared_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = provider;
        self
    }

    /// Base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Resolve a resource path (e.g. `/products/5`) under the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn resolve(&self, path: &str) -> crate::Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::InvalidUrl)
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Start a request for `path` under the base URL.
    pub fn request(&self, method: Method, path: &str) -> ApiRequest<'_, C> {
        let builder = self
            .resolve(path)
            .map(|url| Request::builder(method, url).header(CONTENT_TYPE, APPLICATION_JSON));
        ApiRequest {
            api: self,
            builder,
        }
    }

    /// Start a GET request.
    pub fn get(&self, path: &str) -> ApiRequest<'_, C> {
        self.request(Method::GET, path)
    }

    /// Start a POST request.
    pub fn post(&self, path: &str) -> ApiRequest<'_, C> {
        self.request(Method::POST, path)
    }

    /// Start a PUT request.
    pub fn put(&self, path: &str) -> ApiRequest<'_, C> {
        self.request(Method::PUT, path)
    }

    /// Start a PATCH request.
    pub fn patch(&self, path: &str) -> ApiRequest<'_, C> {
        self.request(Method::PATCH, path)
    }

    /// Start a DELETE request.
    pub fn delete(&self, path: &str) -> ApiRequest<'_, C> {
        self.request(Method::DELETE, path)
    }

    /// Run a prepared request through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for non-2xx responses and transport failures.
    pub async fn send(&self, mut request: Request) -> ApiResult<Payload> {
        inject_credentials(&mut request, self.credentials.as_ref());

        let method = request.method().clone();
        let path = request.url().path().to_string();

        let outcome = match self.client.execute(request).await {
            Ok(response) => response.error_for_status(),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(response) => Ok(response.into_payload()),
            Err(err) => {
                let error = ApiError::from(err);
                if error.status().is_none() {
                    warn!(%method, %path, cause = ?error.cause(), "request failed without response");
                } else {
                    debug!(
                        %method,
                        %path,
                        status = ?error.status(),
                        message = error.message(),
                        error_codes = ?error.error_codes(),
                        "request failed"
                    );
                }
                Err(error)
            }
        }
    }
}

/// A request being prepared by [`ApiClient`].
///
/// Errors while building (bad path, unserializable body) are kept and
/// reported by [`send`](Self::send) as an [`ApiError`].
#[must_use = "requests do nothing until sent"]
pub struct ApiRequest<'a, C> {
    api: &'a ApiClient<C>,
    builder: crate::Result<RequestBuilder>,
}

impl<C> fmt::Debug for ApiRequest<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> ApiRequest<'_, C> {
    /// Append query parameters serialized from `params`.
    pub fn query<Q: Serialize>(mut self, params: &Q) -> Self {
        self.builder = self.builder.and_then(|builder| {
            let encoded = storefront_core::to_query_string(params)?;
            Ok(builder.query_string(&encoded))
        });
        self
    }

    /// Set a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Self {
        self.builder = self.builder.and_then(|builder| builder.json(body));
        self
    }

    /// Send and return the body as received.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for build failures, non-2xx responses and
    /// transport failures.
    pub async fn send(self) -> ApiResult<Payload> {
        let request = self.builder?.build();
        self.api.send(request).await
    }

    /// Send and decode the whole body into `T`.
    ///
    /// Enveloped bodies are decoded whole, `success` key included.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send), plus a body that does not match `T`.
    pub async fn send_as<T: DeserializeOwned>(self) -> ApiResult<T> {
        let payload = self.send().await?;
        payload.decode().map_err(|err| {
            warn!(error = %err, "response body does not match the expected type");
            ApiError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use serde_json::{Value, json};
    use storefront_core::{Response, StaticCredentials};

    use super::*;

    /// In-memory transport recording the last request.
    #[derive(Clone, Default)]
    struct FakeClient {
        reply: Arc<Mutex<Option<crate::Result<(u16, &'static str)>>>>,
        seen: Arc<Mutex<Vec<Request>>>,
    }

    impl FakeClient {
        fn replying(status: u16, body: &'static str) -> Self {
            let client = Self::default();
            *client.reply.lock().expect("lock") = Some(Ok((status, body)));
            client
        }

        fn failing(error: Error) -> Self {
            let client = Self::default();
            *client.reply.lock().expect("lock") = Some(Err(error));
            client
        }

        fn last_request(&self) -> Request {
            self.seen
                .lock()
                .expect("lock")
                .last()
                .cloned()
                .expect("a request was sent")
        }
    }

    impl HttpClient for FakeClient {
        async fn execute(&self, request: Request) -> crate::Result<Response> {
            self.seen.lock().expect("lock").push(request);
            match self.reply.lock().expect("lock").take().expect("one reply") {
                Ok((status, body)) => Ok(Response::new(
                    status,
                    HashMap::new(),
                    Bytes::from_static(body.as_bytes()),
                )),
                Err(err) => Err(err),
            }
        }
    }

    fn api(client: FakeClient) -> ApiClient<FakeClient> {
        ApiClient::new(client, "http://localhost:8080/api/v1").expect("base url")
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let api = api(FakeClient::default());
        check!(api.base_url().as_str() == "http://localhost:8080/api/v1/");
        check!(
            api.resolve("/products/5").expect("url").as_str()
                == "http://localhost:8080/api/v1/products/5"
        );
        check!(
            api.resolve("categories").expect("url").as_str()
                == "http://localhost:8080/api/v1/categories"
        );
    }

    #[test]
    fn invalid_base_url() {
        let result = ApiClient::new(FakeClient::default(), "not a url");
        check!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn sets_content_type_and_credentials() {
        let fake = FakeClient::replying(200, "{}");
        let api = api(fake.clone()).with_credentials(StaticCredentials::new("tok", 8));

        api.get("/users/8").send().await.expect("ok");

        let request = fake.last_request();
        check!(request.header("Content-Type") == Some("application/json"));
        check!(request.header("Authorization") == Some("Bearer tok"));
        check!(request.header("X-User-Id") == Some("8"));
        check!(request.url().path() == "/api/v1/users/8");
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_credentials() {
        let fake = FakeClient::replying(200, "[]");
        api(fake.clone()).get("/products").send().await.expect("ok");

        let request = fake.last_request();
        check!(request.header("Authorization").is_none());
        check!(request.header("X-User-Id").is_none());
    }

    #[tokio::test]
    async fn envelope_is_returned_whole() {
        let fake = FakeClient::replying(200, r#"{"success":true,"data":{"id":5}}"#);
        let payload = api(fake).get("/products/5").send().await.expect("ok");

        check!(payload.is_envelope());
        check!(payload.into_value() == json!({"success": true, "data": {"id": 5}}));
    }

    #[tokio::test]
    async fn bare_body_is_returned_unchanged() {
        let fake = FakeClient::replying(200, r#"{"id":5,"name":"Widget"}"#);
        let value: Value = api(fake).get("/products/5").send_as().await.expect("ok");

        check!(value == json!({"id": 5, "name": "Widget"}));
    }

    #[tokio::test]
    async fn error_status_is_normalized() {
        let fake = FakeClient::replying(
            400,
            r#"{"success":false,"message":"Validation failed","errors":[{"field":"email","message":"invalid"}]}"#,
        );
        let result = api(fake).post("/auth/register").json(&json!({"email": "x"})).send().await;

        let_assert!(Err(error) = result);
        check!(error.status() == Some(400));
        check!(error.detailed_message() == Some("Validation failed. Field errors: email: invalid"));
    }

    #[tokio::test]
    async fn transport_failure_is_normalized() {
        let fake = FakeClient::failing(Error::connection("connection refused"));
        let result = api(fake).get("/products").send().await;

        let_assert!(Err(error) = result);
        check!(error.message() == "Network error occurred");
        check!(!error.has_details());
    }

    #[tokio::test]
    async fn query_is_appended() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Range {
            min_price: f64,
            max_price: f64,
        }

        let fake = FakeClient::replying(200, "[]");
        api(fake.clone())
            .get("/products/price-range")
            .query(&Range {
                min_price: 10.5,
                max_price: 99.99,
            })
            .send()
            .await
            .expect("ok");

        check!(fake.last_request().url().query() == Some("minPrice=10.5&maxPrice=99.99"));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_an_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Count {
            count: u64,
        }

        let fake = FakeClient::replying(200, r#"{"count":"many"}"#);
        let result = api(fake).get("/products/count").send_as::<Count>().await;

        let_assert!(Err(error) = result);
        check!(error.message().starts_with("JSON deserialization error at 'count'"));
        check!(error.status().is_none());
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_unit() {
        let fake = FakeClient::replying(204, "");
        api(fake).delete("/products/5").send_as::<()>().await.expect("ok");
    }
}
