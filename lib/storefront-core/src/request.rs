//! Outgoing requests.
//!
//! A [`Request`] is what the pipeline hands to an
//! [`HttpClient`](crate::HttpClient): method, absolute URL, headers and an
//! optional JSON body. The credential stage may add headers afterwards;
//! nothing else changes once the request is built.
//!
//! # Example
//!
//! ```
//! use storefront_core::{Method, Request};
//!
//! let url = url::Url::parse("http://localhost:8080/api/v1/products/search").expect("url");
//! let request = Request::builder(Method::GET, url)
//!     .query_string("name=lamp")
//!     .build();
//! assert_eq!(request.url().query(), Some("name=lamp"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{APPLICATION_JSON, CONTENT_TYPE};

/// Request ready to be sent.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Start building a request.
    #[must_use]
    pub fn builder(method: Method, url: Url) -> RequestBuilder {
        RequestBuilder {
            request: Self {
                method,
                url,
                headers: HashMap::new(),
                body: None,
            },
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute URL, query included.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// All headers, names as set.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Set a header, dropping any header of the same name in another casing.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.into());
    }

    /// Encoded JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Split into (method, url, headers, body) for the transport.
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder returned by [`Request::builder`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.request.set_header(name, value);
        self
    }

    /// Append an encoded query string after any query already in the URL.
    ///
    /// An empty string leaves the URL untouched.
    #[must_use]
    pub fn query_string(mut self, encoded: &str) -> Self {
        if encoded.is_empty() {
            return self;
        }
        let url = &mut self.request.url;
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
            _ => encoded.to_string(),
        };
        url.set_query(Some(&query));
        self
    }

    /// Encode `value` as the JSON body and set the matching content type.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> crate::Result<Self> {
        self.request.body = Some(crate::to_json(value)?);
        Ok(self.header(CONTENT_TYPE, APPLICATION_JSON))
    }

    /// Finish the request.
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}
