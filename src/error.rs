//! Error types for PriceScout
//!
//! One error enum for the whole client: validation, HTTP transport,
//! server-reported failures and response decoding.

use thiserror::Error;

/// Main error type for PriceScout operations
#[derive(Error, Debug)]
pub enum PriceScoutError {
    #[error("Please enter a search query.")]
    EmptyQuery,

    #[error("Invalid base URL '{0}': {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PriceScout operations
pub type Result<T> = std::result::Result<T, PriceScoutError>;

impl PriceScoutError {
    /// Build the error for a non-2xx response: prefer the server's `detail`
    /// field, fall back to "<status> <reason phrase>".
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<crate::api::ErrorBody>(body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| {
                format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
                    .trim_end()
                    .to_string()
            });
        PriceScoutError::Api {
            status: status.as_u16(),
            detail,
        }
    }

    /// Check if this error is recoverable by resubmitting (all search errors
    /// are; setup failures are not)
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PriceScoutError::Io(_) | PriceScoutError::InvalidBaseUrl(_, _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_detail_field() {
        let err = PriceScoutError::from_status(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"detail": "Invalid API key"}"#,
        );
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[test]
    fn status_error_falls_back_to_reason_phrase() {
        let err = PriceScoutError::from_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "<html>gateway exploded</html>",
        );
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn status_error_ignores_json_without_detail() {
        let err = PriceScoutError::from_status(
            reqwest::StatusCode::BAD_GATEWAY,
            r#"{"message": "nope"}"#,
        );
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[test]
    fn empty_query_message_matches_ui_copy() {
        assert_eq!(
            PriceScoutError::EmptyQuery.to_string(),
            "Please enter a search query."
        );
    }
}
