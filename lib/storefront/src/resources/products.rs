//! Product endpoints (`/products`).

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_core::HttpClient;

use crate::{ApiClient, ApiResult};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Lowest price.
    pub min_price: f64,
    /// Highest price.
    pub max_price: f64,
}

/// Sort order for paginated listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Page selection for `/products/paginated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Field to sort by.
    pub sort_by: String,
    /// Sort order.
    pub sort_direction: SortDirection,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "id".to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

/// Search term with page selection for `/products/search/paginated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    /// Search term.
    pub term: String,
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl SearchPage {
    /// First page of ten results for `term`.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: 0,
            size: 10,
        }
    }
}

/// Number of recent products to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewArrivals {
    /// Maximum number of products.
    pub limit: u32,
}

impl Default for NewArrivals {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

#[derive(Serialize)]
struct NameQuery<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceQuery {
    new_price: f64,
}

/// Product endpoints.
#[derive(Debug)]
pub struct Products<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Products<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    /// `POST /products`
    pub async fn create<T: DeserializeOwned, B: Serialize>(&self, product: &B) -> ApiResult<T> {
        self.api.post("/products").json(product).send_as().await
    }

    /// `GET /products/{id}`
    pub async fn get_by_id<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api.get(&format!("/products/{id}")).send_as().await
    }

    /// `GET /products`
    pub async fn list<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/products").send_as().await
    }

    /// `GET /products/active`
    pub async fn active<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/products/active").send_as().await
    }

    /// `GET /products/category/{category_id}`
    pub async fn by_category<T: DeserializeOwned>(&self, category_id: u64) -> ApiResult<T> {
        self.api
            .get(&format!("/products/category/{category_id}"))
            .send_as()
            .await
    }

    /// `GET /products/search?name=`
    pub async fn search_by_name<T: DeserializeOwned>(&self, name: &str) -> ApiResult<T> {
        self.api
            .get("/products/search")
            .query(&NameQuery { name })
            .send_as()
            .await
    }

    /// `GET /products/price-range?minPrice=&maxPrice=`
    pub async fn by_price_range<T: DeserializeOwned>(&self, range: PriceRange) -> ApiResult<T> {
        self.api
            .get("/products/price-range")
            .query(&range)
            .send_as()
            .await
    }

    /// `PUT /products/{id}`
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        id: u64,
        product: &B,
    ) -> ApiResult<T> {
        self.api
            .put(&format!("/products/{id}"))
            .json(product)
            .send_as()
            .await
    }

    /// `PATCH /products/{id}/price?newPrice=`
    pub async fn update_price<T: DeserializeOwned>(&self, id: u64, new_price: f64) -> ApiResult<T> {
        self.api
            .patch(&format!("/products/{id}/price"))
            .query(&PriceQuery { new_price })
            .send_as()
            .await
    }

    /// `PATCH /products/{id}/activate`
    pub async fn activate<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api
            .patch(&format!("/products/{id}/activate"))
            .send_as()
            .await
    }

    /// `PATCH /products/{id}/deactivate`
    pub async fn deactivate<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api
            .patch(&format!("/products/{id}/deactivate"))
            .send_as()
            .await
    }

    /// `DELETE /products/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api
            .delete(&format!("/products/{id}"))
            .send_as()
            .await
    }

    /// `GET /products/count`
    pub async fn count<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/products/count").send_as().await
    }

    /// `GET /products/count/category/{category_id}`
    pub async fn count_by_category<T: DeserializeOwned>(&self, category_id: u64) -> ApiResult<T> {
        self.api
            .get(&format!("/products/count/category/{category_id}"))
            .send_as()
            .await
    }

    /// `GET /products/paginated?page=&size=&sortBy=&sortDirection=`
    pub async fn paginated<T: DeserializeOwned>(&self, page: &Page) -> ApiResult<T> {
        self.api
            .get("/products/paginated")
            .query(page)
            .send_as()
            .await
    }

    /// `GET /products/search/paginated?term=&page=&size=`
    pub async fn search_paginated<T: DeserializeOwned>(&self, search: &SearchPage) -> ApiResult<T> {
        self.api
            .get("/products/search/paginated")
            .query(search)
            .send_as()
            .await
    }

    /// `GET /products/filter` with arbitrary filter parameters.
    pub async fn filter<T: DeserializeOwned, Q: Serialize>(&self, filters: &Q) -> ApiResult<T> {
        self.api
            .get("/products/filter")
            .query(filters)
            .send_as()
            .await
    }

    /// `GET /products/new-arrivals?limit=`
    pub async fn new_arrivals<T: DeserializeOwned>(&self, arrivals: NewArrivals) -> ApiResult<T> {
        self.api
            .get("/products/new-arrivals")
            .query(&arrivals)
            .send_as()
            .await
    }
}
