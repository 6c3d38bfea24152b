//! Analytics (`/analytics`) and performance (`/performance`) endpoints.

use serde::de::DeserializeOwned;
use storefront_core::HttpClient;

use crate::{ApiClient, ApiResult};

/// Analytics and performance endpoints.
#[derive(Debug)]
pub struct Analytics<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Analytics<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    /// `GET /analytics/dashboard`
    pub async fn dashboard<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/analytics/dashboard").send_as().await
    }

    /// `GET /analytics/user/{user_id}`
    pub async fn user<T: DeserializeOwned>(&self, user_id: u64) -> ApiResult<T> {
        self.api
            .get(&format!("/analytics/user/{user_id}"))
            .send_as()
            .await
    }

    /// `GET /performance/metrics`
    pub async fn performance_metrics<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/performance/metrics").send_as().await
    }

    /// `GET /performance/cache`
    pub async fn cache_stats<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/performance/cache").send_as().await
    }
}
