//! Integration tests for the per-resource endpoint groups.

use assert2::{check, let_assert};
use serde::Serialize;
use serde_json::{Value, json};
use storefront::resources::{NewArrivals, Page, PriceRange, SearchPage, SortDirection};
use storefront::{ApiClient, HyperClient, PasswordChangeForm, PasswordError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

fn api(server: &MockServer) -> ApiClient<HyperClient> {
    ApiClient::new(HyperClient::new(), format!("{}/api/v1", server.uri())).expect("base url")
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true}))
}

#[tokio::test]
async fn test_price_range_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/price-range"))
        .and(query_param("minPrice", "10.5"))
        .and(query_param("maxPrice", "99.99"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let range = PriceRange {
        min_price: 10.5,
        max_price: 99.99,
    };
    let _: Value = api(&server)
        .products()
        .by_price_range(range)
        .await
        .expect("products");
}

#[tokio::test]
async fn test_update_price_is_a_patch_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/products/12/price"))
        .and(query_param("newPrice", "19.99"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let _: Value = api(&server)
        .products()
        .update_price(12, 19.99)
        .await
        .expect("updated");
}

#[tokio::test]
async fn test_paginated_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/paginated"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("sortBy", "id"))
        .and(query_param("sortDirection", "ASC"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let _: Value = api(&server)
        .products()
        .paginated(&Page::default())
        .await
        .expect("page");
}

#[tokio::test]
async fn test_search_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/search"))
        .and(query_param("name", "desk lamp"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/search/paginated"))
        .and(query_param("term", "lamp"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let _: Value = api
        .products()
        .search_by_name("desk lamp")
        .await
        .expect("search");

    let search = SearchPage {
        term: "lamp".to_string(),
        page: 1,
        size: 5,
    };
    let _: Value = api
        .products()
        .search_paginated(&search)
        .await
        .expect("search page");
}

#[tokio::test]
async fn test_filter_takes_arbitrary_parameters() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        category_id: u64,
        in_stock: bool,
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/filter"))
        .and(query_param("categoryId", "4"))
        .and(query_param("inStock", "true"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let filter = Filter {
        category_id: 4,
        in_stock: true,
    };
    let _: Value = api(&server)
        .products()
        .filter(&filter)
        .await
        .expect("filter");
}

#[tokio::test]
async fn test_new_arrivals_and_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/new-arrivals"))
        .and(query_param("limit", "3"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/count/category/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(14)))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let _: Value = api
        .products()
        .new_arrivals(NewArrivals { limit: 3 })
        .await
        .expect("arrivals");

    let count: u64 = api
        .products()
        .count_by_category(2)
        .await
        .expect("count");
    check!(count == 14);
}

#[tokio::test]
async fn test_descending_sort_direction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/paginated"))
        .and(query_param("sortBy", "price"))
        .and(query_param("sortDirection", "DESC"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let page = Page {
        sort_by: "price".to_string(),
        sort_direction: SortDirection::Desc,
        ..Page::default()
    };
    let _: Value = api(&server)
        .products()
        .paginated(&page)
        .await
        .expect("page");
}

#[tokio::test]
async fn test_category_update_sends_body() {
    let server = MockServer::start().await;

    let category = json!({"name": "Lighting", "description": "Lamps"});
    Mock::given(method("PUT"))
        .and(path("/api/v1/categories/8"))
        .and(body_json(&category))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 8, "name": "Lighting"})))
        .expect(1)
        .mount(&server)
        .await;

    let updated: Value = api(&server)
        .categories()
        .update(8, &category)
        .await
        .expect("updated");
    check!(updated["id"] == 8);
}

#[tokio::test]
async fn test_user_by_email_escapes_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/email/ada%20lovelace@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let user: Value = api(&server)
        .users()
        .get_by_email("ada lovelace@example.com")
        .await
        .expect("user");
    check!(user == json!({"id": 1}));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;

    let credentials = json!({"email": "ada@example.com", "password": "Secret123"});
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(&credentials))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": {"id": 3, "email": "ada@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response: Value = api(&server)
        .users()
        .login(&credentials)
        .await
        .expect("login");
    check!(response["token"] == "jwt-abc");
}

#[tokio::test]
async fn test_change_password_sends_validated_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/users/3/password"))
        .and(body_json(json!({
            "currentPassword": "Old12345",
            "newPassword": "New12345"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let form = PasswordChangeForm::new("Old12345", "New12345", "New12345");
    let_assert!(Ok(change) = form.validate());

    api(&server)
        .users()
        .change_password::<()>(3, &change)
        .await
        .expect("changed");
}

#[tokio::test]
async fn test_rejected_form_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let form = PasswordChangeForm::new("Old12345", "short", "short");
    let_assert!(Err(PasswordError::TooWeak) = form.validate());
}

#[tokio::test]
async fn test_analytics_paths() {
    let server = MockServer::start().await;

    for route in [
        "/api/v1/analytics/dashboard",
        "/api/v1/analytics/user/5",
        "/api/v1/performance/metrics",
        "/api/v1/performance/cache",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = api(&server);
    let analytics = api.analytics();
    let _: Value = analytics.dashboard().await.expect("dashboard");
    let _: Value = analytics.user(5).await.expect("user analytics");
    let _: Value = analytics.performance_metrics().await.expect("metrics");
    let _: Value = analytics.cache_stats().await.expect("cache");
}
