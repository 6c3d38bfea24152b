//! Category endpoints (`/categories`).

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_core::HttpClient;

use crate::{ApiClient, ApiResult};

/// Category endpoints.
#[derive(Debug)]
pub struct Categories<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Categories<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    /// `POST /categories`
    pub async fn create<T: DeserializeOwned, B: Serialize>(&self, category: &B) -> ApiResult<T> {
        self.api.post("/categories").json(category).send_as().await
    }

    /// `GET /categories/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api.get(&format!("/categories/{id}")).send_as().await
    }

    /// `GET /categories`
    pub async fn list<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/categories").send_as().await
    }

    /// `PUT /categories/{id}`
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        id: u64,
        category: &B,
    ) -> ApiResult<T> {
        self.api
            .put(&format!("/categories/{id}"))
            .json(category)
            .send_as()
            .await
    }

    /// `DELETE /categories/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api
            .delete(&format!("/categories/{id}"))
            .send_as()
            .await
    }
}
