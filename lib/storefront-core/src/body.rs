//! JSON bodies and query strings.

use bytes::Bytes;

use crate::{Error, Result};

/// Header naming the body's media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type of every storefront request.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialize a request body.
///
/// # Example
///
/// ```
/// use storefront_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Category { name: String }
///
/// let category = Category { name: "Books".to_string() };
/// let bytes = to_json(&category).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Books"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Serialize query parameters with `serde_html_form`.
///
/// Fields skipped with `skip_serializing_if` are left out and sequences
/// become repeated parameters.
///
/// # Example
///
/// ```
/// use storefront_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct PriceRange { min_price: f64, max_price: f64 }
///
/// let range = PriceRange { min_price: 10.5, max_price: 99.99 };
/// let query = to_query_string(&range).expect("serialize");
/// assert_eq!(query, "minPrice=10.5&maxPrice=99.99");
/// ```
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_html_form::to_string(value)?)
}

/// Decode a parsed response body into `T`.
///
/// On mismatch the error names the failing field, e.g. `data.category.id`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value)
        .map_err(|err| Error::json_deserialization(err.path().to_string(), err.inner().to_string()))
}
