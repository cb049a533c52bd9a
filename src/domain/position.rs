//! Position type representing one normalized holding or liability.

use crate::domain::{Decimal, InstrumentType};
use serde::{Deserialize, Serialize};

/// A single normalized position.
///
/// Every numeric field is either a finite decimal or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// `"{name}-{index}"`, unique within one snapshot.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
    /// Signed valuation. Liabilities carry the sign supplied by the source.
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_purchase_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_change: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_or_loss: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_or_loss_rate: Option<Decimal>,
}

impl Position {
    /// A position with only identity and value set.
    pub fn new(
        name: impl Into<String>,
        instrument_type: InstrumentType,
        value: Decimal,
        index: usize,
    ) -> Self {
        let name = name.into();
        Position {
            id: Self::compute_id(&name, index),
            name,
            instrument_type,
            value,
            account: None,
            owner: None,
            ticker_symbol: None,
            shares: None,
            avg_purchase_price: None,
            current_price: None,
            day_change: None,
            purchase_amount: None,
            profit_or_loss: None,
            profit_or_loss_rate: None,
        }
    }

    pub fn compute_id(name: &str, index: usize) -> String {
        format!("{}-{}", name, index)
    }

    pub fn is_liability(&self) -> bool {
        self.instrument_type.is_liability()
    }

    /// Owner for grouping; empty strings count as missing.
    pub fn owner_label(&self) -> Option<&str> {
        self.owner.as_deref().filter(|o| !o.is_empty())
    }
}
