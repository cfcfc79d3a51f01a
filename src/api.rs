//! Wire types for the product-search API
//!
//! Typed request/response schema for `POST {base}/products/`. The backend's
//! product shape is optional-field-heavy; everything except the title may be
//! absent and the UI substitutes placeholders at render time.

use serde::{Deserialize, Deserializer, Serialize};

/// Request body for a product search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
}

/// A single product as returned by the backend, passed through unmodified
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub price_raw: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    /// Server-computed best-match highlight; opaque to the client
    #[serde(default)]
    pub is_recommended: bool,
}

/// Response body for a product search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default, deserialize_with = "products_or_empty")]
    pub products: Vec<Product>,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A missing, null or non-array `products` field decodes to an empty list;
/// a malformed element inside an actual array is still a hard decode error.
fn products_or_empty<'de, D>(deserializer: D) -> Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_expected_shape() {
        let req = SearchRequest {
            query: "Samsung s24".to_string(),
            max_results: 6,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"query":"Samsung s24","max_results":6}"#
        );
    }

    #[test]
    fn product_defaults_optional_fields() {
        let product: Product = serde_json::from_str(r#"{"title": "Galaxy S24"}"#).unwrap();
        assert_eq!(product.title, "Galaxy S24");
        assert!(product.price.is_none());
        assert!(product.link.is_none());
        assert!(!product.is_recommended);
    }

    #[test]
    fn response_preserves_product_order() {
        let body = r#"{
            "query": "phone",
            "total_results": 3,
            "products": [
                {"title": "A"},
                {"title": "B"},
                {"title": "C"}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let titles: Vec<&str> = resp.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn missing_products_field_decodes_to_empty() {
        let resp: SearchResponse = serde_json::from_str(r#"{"query": "x"}"#).unwrap();
        assert!(resp.products.is_empty());
    }

    #[test]
    fn non_array_products_decodes_to_empty() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"query": "x", "products": "oops"}"#).unwrap();
        assert!(resp.products.is_empty());

        let resp: SearchResponse =
            serde_json::from_str(r#"{"query": "x", "products": null}"#).unwrap();
        assert!(resp.products.is_empty());
    }

    #[test]
    fn malformed_product_element_is_an_error() {
        // An array element without a title fails the whole decode instead of
        // silently rendering a placeholder card.
        let result = serde_json::from_str::<SearchResponse>(
            r#"{"products": [{"price": 9.99}]}"#,
        );
        assert!(result.is_err());
    }
}
