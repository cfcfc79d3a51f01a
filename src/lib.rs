//! PriceScout - Terminal product-search client
//!
//! Talks to a remote product-search API (`POST {base}/products/`) and renders
//! the results either as a one-shot CLI listing or in an interactive TUI.
//!
//! # Features
//!
//! - **Interactive TUI**: search form, result table and detail panel
//! - **One-shot CLI**: styled or JSON output for scripting
//! - **Mock mode**: fixture endpoint for working without API credentials
//! - **Typed wire schema**: malformed backend responses fail predictably
//!
//! # Example
//!
//! ```no_run
//! use pricescout::{EndpointMode, SearchClient};
//!
//! fn main() -> pricescout::Result<()> {
//!     let client = SearchClient::new("http://127.0.0.1:8000")?;
//!     let response = client.search("Samsung s24", 6, EndpointMode::Live)?;
//!
//!     for product in &response.products {
//!         println!(
//!             "{} — {}",
//!             product.title,
//!             pricescout::format_price(product.price, product.price_raw.as_deref())
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod logging;
pub mod tui;

// Re-export main types
pub use api::{Product, SearchRequest, SearchResponse};
pub use client::{EndpointMode, SearchClient, DEFAULT_BASE_URL};
pub use error::{PriceScoutError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a product price for display: the backend's raw string wins, then
/// the numeric price in rupees, then a placeholder.
pub fn format_price(price: Option<f64>, price_raw: Option<&str>) -> String {
    if let Some(raw) = price_raw {
        if !raw.trim().is_empty() {
            return raw.trim().to_string();
        }
    }
    match price {
        Some(p) => format!("\u{20B9}{}", p),
        None => "\u{2014}".to_string(),
    }
}

/// Format a rating to one decimal place, or a placeholder when absent
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.1}", r),
        None => "\u{2014}".to_string(),
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the product-search backend
    pub base_url: String,
    /// Result limit sent with each request (1..=50)
    pub max_results: u32,
    /// Use the keyless mock endpoint
    pub use_mock: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: 6,
            use_mock: false,
        }
    }
}

impl SearchConfig {
    pub fn endpoint_mode(&self) -> EndpointMode {
        if self.use_mock {
            EndpointMode::Mock
        } else {
            EndpointMode::Live
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_prefers_raw_string() {
        assert_eq!(
            format_price(Some(12999.0), Some("\u{20B9}12,999")),
            "\u{20B9}12,999"
        );
    }

    #[test]
    fn price_formats_numeric_without_trailing_zeroes() {
        assert_eq!(format_price(Some(79999.0), None), "\u{20B9}79999");
        assert_eq!(format_price(Some(129.99), None), "\u{20B9}129.99");
    }

    #[test]
    fn price_placeholder_when_absent() {
        assert_eq!(format_price(None, None), "\u{2014}");
        assert_eq!(format_price(None, Some("  ")), "\u{2014}");
    }

    #[test]
    fn rating_renders_one_decimal() {
        assert_eq!(format_rating(Some(4.5)), "4.5");
        assert_eq!(format_rating(Some(4.0)), "4.0");
        assert_eq!(format_rating(None), "\u{2014}");
    }

    #[test]
    fn default_config_targets_local_backend() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.max_results, 6);
        assert_eq!(config.endpoint_mode(), EndpointMode::Live);
    }
}
