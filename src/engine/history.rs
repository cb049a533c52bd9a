//! History rows to chartable series.
//!
//! Columns are not declared anywhere: keys are discovered across all rows and
//! split into category keys (exact instrument type labels) and instrument keys
//! (free-text names). Each row gets a derived net worth.

use crate::domain::{
    Decimal, InstrumentType, ProcessedPoint, DATE_KEY, LEGACY_VALUE_KEY, NET_WORTH_KEY,
};
use crate::engine::coerce::coerce_strict;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Why a reshaped history is (or is not) drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryStatus {
    Ready,
    /// No rows, or the first row is not a keyed record.
    Empty,
    /// Rows use the old single `value` column and need migrating. They are
    /// still reshaped, with `value` treated as an instrument key.
    LegacyFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshapedHistory {
    pub status: HistoryStatus,
    pub processed_points: Vec<ProcessedPoint>,
    pub category_keys: Vec<String>,
    pub instrument_keys: Vec<String>,
}

impl ReshapedHistory {
    fn empty(status: HistoryStatus) -> Self {
        ReshapedHistory {
            status,
            processed_points: Vec::new(),
            category_keys: Vec::new(),
            instrument_keys: Vec::new(),
        }
    }

    pub fn latest(&self) -> Option<&ProcessedPoint> {
        self.processed_points.last()
    }
}

/// Reshape chronologically ordered history rows. Rows are not re-sorted.
pub fn reshape_history(points: &[Value]) -> ReshapedHistory {
    let Some(first) = points.first().and_then(Value::as_object) else {
        return ReshapedHistory::empty(HistoryStatus::Empty);
    };
    let status = if is_legacy_row(first) {
        debug!("History uses the legacy single-value layout");
        HistoryStatus::LegacyFormat
    } else {
        HistoryStatus::Ready
    };

    let rows: Vec<&Map<String, Value>> = points.iter().filter_map(Value::as_object).collect();
    if rows.len() < points.len() {
        debug!(
            skipped = points.len() - rows.len(),
            "Skipping history rows that are not records"
        );
    }

    let keys = discover_keys(&rows);
    let (category_keys, instrument_keys): (Vec<String>, Vec<String>) = keys
        .iter()
        .cloned()
        .partition(|k| InstrumentType::from_label(k).is_some());

    let processed_points = rows
        .iter()
        .map(|row| process_row(row, &keys, &category_keys))
        .collect();

    ReshapedHistory {
        status,
        processed_points,
        category_keys,
        instrument_keys,
    }
}

/// Union of row keys in discovery order, minus the date and synthetic columns.
fn discover_keys(rows: &[&Map<String, Value>]) -> Vec<String> {
    let liability = InstrumentType::Liability.label();
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for row in rows {
        for key in row.keys() {
            if key == DATE_KEY || key == NET_WORTH_KEY || key == liability {
                continue;
            }
            if seen.insert(key.as_str()) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

fn is_legacy_row(row: &Map<String, Value>) -> bool {
    let mut fields = row.keys().filter(|k| k.as_str() != DATE_KEY);
    matches!(
        (fields.next(), fields.next()),
        (Some(only), None) if only == LEGACY_VALUE_KEY
    )
}

fn process_row(
    row: &Map<String, Value>,
    keys: &[String],
    category_keys: &[String],
) -> ProcessedPoint {
    let values: BTreeMap<String, Decimal> = keys
        .iter()
        .map(|k| (k.clone(), cell(row, k)))
        .collect();

    let liability = cell(row, InstrumentType::Liability.label());
    let net_worth = net_worth(&values, category_keys, liability);

    ProcessedPoint {
        date: date_label(row.get(DATE_KEY)),
        values,
        liability,
        net_worth,
    }
}

/// Spot categories plus the margin, leveraged and liability balances.
///
/// Margin and leveraged balances are already net gains, and liabilities are
/// already negative, so they are added once on top of the spot total.
fn net_worth(
    values: &BTreeMap<String, Decimal>,
    category_keys: &[String],
    liability: Decimal,
) -> Decimal {
    let value_of = |key: &str| values.get(key).copied().unwrap_or_default();
    let margin = InstrumentType::MarginStocks.label();
    let leveraged = InstrumentType::LeveragedFX.label();

    let spot_total: Decimal = category_keys
        .iter()
        .filter(|k| k.as_str() != margin && k.as_str() != leveraged)
        .map(|k| value_of(k.as_str()))
        .sum();

    [spot_total, value_of(margin), value_of(leveraged), liability]
        .into_iter()
        .sum()
}

/// Whole-cell numeric value; anything else counts as zero.
fn cell(row: &Map<String, Value>, key: &str) -> Decimal {
    row.get(key).and_then(coerce_strict).unwrap_or_default()
}

fn date_label(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_legacy_row() {
        let legacy = json!({"date": "2023-01", "value": 100});
        assert!(is_legacy_row(legacy.as_object().unwrap()));

        let mixed = json!({"date": "2023-01", "value": 100, "現金・預金": 5});
        assert!(!is_legacy_row(mixed.as_object().unwrap()));

        let date_only = json!({"date": "2023-01"});
        assert!(!is_legacy_row(date_only.as_object().unwrap()));
    }

    #[test]
    fn test_discovery_skips_reserved_keys() {
        let a = json!({"date": "d1", "純資産": 1, "負債": -1, "Toyota": 2});
        let b = json!({"date": "d2", "現金・預金": 3, "Toyota": 4});
        let rows = vec![a.as_object().unwrap(), b.as_object().unwrap()];
        assert_eq!(discover_keys(&rows), vec!["Toyota", "現金・預金"]);
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(Some(&json!("2024/01"))), "2024/01");
        assert_eq!(date_label(Some(&json!(202401))), "202401");
        assert_eq!(date_label(None), "");
    }
}
