//! Reshaped history rows.

use crate::domain::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Column holding the row's date label.
pub const DATE_KEY: &str = "date";
/// Synthetic net worth column; ignored on input, derived on output.
pub const NET_WORTH_KEY: &str = "純資産";
/// Single balance column of the pre-category history layout.
pub const LEGACY_VALUE_KEY: &str = "value";

/// One history row after coercion and net worth derivation.
///
/// Serializes flat: `{"date": ..., "<key>": n, ..., "負債": n, "純資産": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedPoint {
    pub date: String,
    /// Every discovered category and instrument key, zero-filled.
    #[serde(flatten)]
    pub values: BTreeMap<String, Decimal>,
    #[serde(rename = "負債")]
    pub liability: Decimal,
    #[serde(rename = "純資産")]
    pub net_worth: Decimal,
}

impl ProcessedPoint {
    /// Value for a discovered key; zero for anything else.
    pub fn get(&self, key: &str) -> Decimal {
        self.values.get(key).copied().unwrap_or_default()
    }
}
