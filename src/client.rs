//! HTTP client for the product-search backend
//!
//! One blocking POST per search, no retries. The base URL is injected at
//! construction; callers resolve flags/environment before building the client.

use crate::api::{SearchRequest, SearchResponse};
use crate::error::{PriceScoutError, Result};
use crate::logging;
use std::time::Duration;

/// Fallback base URL for a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

// The backend gives its scraper 30s before answering 504; leave headroom.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

/// Selection between the live search path and the keyless mock path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMode {
    #[default]
    Live,
    Mock,
}

impl EndpointMode {
    pub fn path(&self) -> &'static str {
        match self {
            EndpointMode::Live => "/products/",
            EndpointMode::Mock => "/products/mock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointMode::Live => "live",
            EndpointMode::Mock => "mock",
        }
    }
}

/// Client for the product-search API
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the given base URL (e.g. `http://127.0.0.1:8000`)
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| PriceScoutError::InvalidBaseUrl(base_url.to_string(), e))?;
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the full endpoint URL for the given mode
    pub fn endpoint(&self, mode: EndpointMode) -> String {
        format!("{}{}", self.base_url, mode.path())
    }

    /// Submit a search: exactly one outbound POST, body
    /// `{"query": <trimmed>, "max_results": <1..=50>}`.
    pub fn search(&self, query: &str, max_results: u32, mode: EndpointMode) -> Result<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PriceScoutError::EmptyQuery);
        }

        let request = SearchRequest {
            query: query.to_string(),
            max_results: max_results.clamp(1, 50),
        };

        logging::info(
            "CLIENT",
            &format!(
                "POST {} query='{}' max_results={}",
                self.endpoint(mode),
                request.query,
                request.max_results
            ),
        );

        let response = self
            .http
            .post(self.endpoint(mode))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let err = PriceScoutError::from_status(status, &body);
            logging::warn("CLIENT", &format!("search failed: {}", err));
            return Err(err);
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| PriceScoutError::InvalidResponse(e.to_string()))?;

        logging::info(
            "CLIENT",
            &format!("{} products for '{}'", parsed.products.len(), request.query),
        );
        Ok(parsed)
    }

    /// Backend health probe (`GET {base}/health`), returned as raw JSON
    pub fn health(&self) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(PriceScoutError::from_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| PriceScoutError::InvalidResponse(e.to_string()))
    }
}
