//! Data source abstraction for fetching the raw dashboard snapshot.

use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod mock;

pub use http::HttpSnapshotSource;
pub use mock::MockSnapshotSource;

/// Source of the raw snapshot payload (`assets` + history rows).
///
/// Implementations own retry/backoff; the engine never retries.
#[async_trait]
pub trait SnapshotSource: Send + Sync + fmt::Debug {
    /// Fetch the current snapshot as undecoded-by-shape JSON.
    async fn fetch_snapshot(&self) -> Result<serde_json::Value, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 404 wrong script URL, 5xx server error)
    HttpError { status: u16, message: String },
    /// Response body was not JSON
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
        }
    }
}

impl std::error::Error for DataSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_display() {
        let err = DataSourceError::NetworkError("connection timeout".to_string());
        assert_eq!(err.to_string(), "Network error: connection timeout");

        let err = DataSourceError::HttpError {
            status: 404,
            message: "Client error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: Client error");

        let err = DataSourceError::ParseError("expected value".to_string());
        assert_eq!(err.to_string(), "Parse error: expected value");

        assert_eq!(DataSourceError::RateLimited.to_string(), "Rate limited");
    }
}
