//! Mock data source for testing without network calls.

use super::{DataSourceError, SnapshotSource};
use async_trait::async_trait;
use serde_json::Value;

/// Returns a fixed payload, or a fixed error.
#[derive(Debug, Clone)]
pub struct MockSnapshotSource {
    response: Result<Value, DataSourceError>,
}

impl MockSnapshotSource {
    /// A source with no assets and an empty `historyByCategory`.
    pub fn new() -> Self {
        Self::with_payload(serde_json::json!({"assets": [], "historyByCategory": []}))
    }

    pub fn with_payload(payload: Value) -> Self {
        Self {
            response: Ok(payload),
        }
    }

    pub fn failing(error: DataSourceError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl Default for MockSnapshotSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<Value, DataSourceError> {
        self.response.clone()
    }
}
