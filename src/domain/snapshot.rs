//! Raw snapshot payload as delivered by the fetch collaborator.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Which history field the snapshot supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    /// `historyByCategory`, the current per-category layout.
    ByCategory,
    /// `history`, kept for sheets not yet migrated.
    Legacy,
}

/// Validated, still unnormalized snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot {
    pub assets: Vec<Value>,
    pub history: Vec<Value>,
    pub history_source: HistorySource,
}

/// Payload shape does not match the input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("snapshot must be a JSON object")]
    NotAnObject,
    #[error("snapshot field `assets` must be an array")]
    AssetsNotArray,
    #[error("snapshot must contain a `historyByCategory` or `history` array")]
    MissingHistory,
}

impl RawSnapshot {
    /// Validate a decoded payload.
    ///
    /// `historyByCategory` wins over `history` when both are arrays.
    pub fn from_json(payload: Value) -> Result<Self, SnapshotError> {
        let Value::Object(mut obj) = payload else {
            return Err(SnapshotError::NotAnObject);
        };

        let assets = match obj.remove("assets") {
            Some(Value::Array(items)) => items,
            _ => return Err(SnapshotError::AssetsNotArray),
        };

        let (history, history_source) = match (obj.remove("historyByCategory"), obj.remove("history")) {
            (Some(Value::Array(points)), _) => (points, HistorySource::ByCategory),
            (_, Some(Value::Array(points))) => (points, HistorySource::Legacy),
            _ => return Err(SnapshotError::MissingHistory),
        };

        debug!(
            assets = assets.len(),
            history = history.len(),
            source = ?history_source,
            "Accepted snapshot"
        );

        Ok(RawSnapshot {
            assets,
            history,
            history_source,
        })
    }

    /// Decode and validate a raw body.
    pub fn from_slice(body: &[u8]) -> Result<Self, SnapshotError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|e| SnapshotError::InvalidJson(e.to_string()))?;
        Self::from_json(payload)
    }
}
