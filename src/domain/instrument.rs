//! Instrument classification: the closed set of position categories.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of a holding or liability.
///
/// Each variant has a source label: the exact string the snapshot uses in the
/// `type` cell of a position row and as a column name in history rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstrumentType {
    Cash,
    Stocks,
    MarginStocks,
    SpotFX,
    LeveragedFX,
    InvestmentTrust,
    Crypto,
    Bonds,
    RealEstate,
    PensionDC,
    Other,
    Liability,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument type: {0}")]
pub struct UnknownInstrumentType(pub String);

impl InstrumentType {
    pub const ALL: [InstrumentType; 12] = [
        InstrumentType::Cash,
        InstrumentType::Stocks,
        InstrumentType::MarginStocks,
        InstrumentType::SpotFX,
        InstrumentType::LeveragedFX,
        InstrumentType::InvestmentTrust,
        InstrumentType::Crypto,
        InstrumentType::Bonds,
        InstrumentType::RealEstate,
        InstrumentType::PensionDC,
        InstrumentType::Other,
        InstrumentType::Liability,
    ];

    /// The label used by the snapshot for this type.
    pub fn label(&self) -> &'static str {
        match self {
            InstrumentType::Cash => "現金・預金",
            InstrumentType::Stocks => "株式(現物)",
            InstrumentType::MarginStocks => "株式(信用)",
            InstrumentType::SpotFX => "FX(現物)",
            InstrumentType::LeveragedFX => "FX(レバレッジ)",
            InstrumentType::InvestmentTrust => "投資信託",
            InstrumentType::Crypto => "暗号資産",
            InstrumentType::Bonds => "債券",
            InstrumentType::RealEstate => "不動産",
            InstrumentType::PensionDC => "DC年金",
            InstrumentType::Other => "その他資産",
            InstrumentType::Liability => "負債",
        }
    }

    /// The English identifier, accepted as an alias when parsing position rows.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentType::Cash => "Cash",
            InstrumentType::Stocks => "Stocks",
            InstrumentType::MarginStocks => "MarginStocks",
            InstrumentType::SpotFX => "SpotFX",
            InstrumentType::LeveragedFX => "LeveragedFX",
            InstrumentType::InvestmentTrust => "InvestmentTrust",
            InstrumentType::Crypto => "Crypto",
            InstrumentType::Bonds => "Bonds",
            InstrumentType::RealEstate => "RealEstate",
            InstrumentType::PensionDC => "PensionDC",
            InstrumentType::Other => "Other",
            InstrumentType::Liability => "Liability",
        }
    }

    /// Exact label match. History columns are classified with this.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Types with shares/price based valuation and profit/loss.
    pub fn is_tradable(&self) -> bool {
        self.is_delta_priced() || self.is_mark_to_market()
    }

    /// Valued by `(current - average) * shares`: the value is the gain itself.
    pub fn is_delta_priced(&self) -> bool {
        matches!(self, InstrumentType::MarginStocks | InstrumentType::LeveragedFX)
    }

    /// Valued by `current * shares`.
    pub fn is_mark_to_market(&self) -> bool {
        matches!(
            self,
            InstrumentType::Stocks
                | InstrumentType::SpotFX
                | InstrumentType::InvestmentTrust
                | InstrumentType::Crypto
        )
    }

    pub fn is_liability(&self) -> bool {
        matches!(self, InstrumentType::Liability)
    }
}

impl FromStr for InstrumentType {
    type Err = UnknownInstrumentType;

    /// Accepts the source label or the English identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .or_else(|| Self::ALL.into_iter().find(|t| t.name() == s))
            .ok_or_else(|| UnknownInstrumentType(s.to_string()))
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InstrumentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InstrumentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for t in InstrumentType::ALL {
            assert_eq!(InstrumentType::from_label(t.label()), Some(t));
            assert_eq!(t.label().parse::<InstrumentType>(), Ok(t));
        }
    }

    #[test]
    fn test_english_alias_only_via_from_str() {
        assert_eq!("MarginStocks".parse(), Ok(InstrumentType::MarginStocks));
        assert_eq!(InstrumentType::from_label("MarginStocks"), None);
    }

    #[test]
    fn test_unknown_type() {
        let err = "Art".parse::<InstrumentType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown instrument type: Art");
    }

    #[test]
    fn test_tradable_partition() {
        let tradable: Vec<_> = InstrumentType::ALL
            .into_iter()
            .filter(InstrumentType::is_tradable)
            .collect();
        assert_eq!(
            tradable,
            vec![
                InstrumentType::Stocks,
                InstrumentType::MarginStocks,
                InstrumentType::SpotFX,
                InstrumentType::LeveragedFX,
                InstrumentType::InvestmentTrust,
                InstrumentType::Crypto,
            ]
        );
        assert!(!InstrumentType::Liability.is_tradable());
        assert!(!InstrumentType::PensionDC.is_tradable());
    }

    #[test]
    fn test_serialization_uses_label() {
        let json = serde_json::to_string(&InstrumentType::Cash).unwrap();
        assert_eq!(json, "\"現金・預金\"");

        let parsed: InstrumentType = serde_json::from_str("\"Crypto\"").unwrap();
        assert_eq!(parsed, InstrumentType::Crypto);
    }
}
