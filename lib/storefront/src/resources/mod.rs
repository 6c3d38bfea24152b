//! Per-resource endpoint groups.
//!
//! Each group maps a semantic operation to a verb, a path and optional query
//! parameters. Response types are chosen by the caller, so the same call can
//! decode into a typed struct or a [`serde_json::Value`].

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use storefront_core::HttpClient;

use crate::ApiClient;

mod analytics;
mod categories;
mod products;
mod users;

pub use analytics::Analytics;
pub use categories::Categories;
pub use products::{NewArrivals, Page, PriceRange, Products, SearchPage, SortDirection};
pub use users::Users;

/// Characters escaped in a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a caller-supplied value for use as one path segment.
fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

impl<C: HttpClient> ApiClient<C> {
    /// Product endpoints.
    pub fn products(&self) -> Products<'_, C> {
        Products::new(self)
    }

    /// Category endpoints.
    pub fn categories(&self) -> Categories<'_, C> {
        Categories::new(self)
    }

    /// User and authentication endpoints.
    pub fn users(&self) -> Users<'_, C> {
        Users::new(self)
    }

    /// Analytics and performance endpoints.
    pub fn analytics(&self) -> Analytics<'_, C> {
        Analytics::new(self)
    }
}
