//! Portfolio totals and category breakdown.

use crate::domain::{Decimal, InstrumentType, Position};
use serde::Serialize;

/// One slice of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: InstrumentType,
    /// Always > 0.
    pub value: Decimal,
    /// Fraction of the breakdown total.
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_assets: Decimal,
    /// Sum of liability values as supplied; not clamped or sign-corrected.
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    pub total_profit_or_loss: Decimal,
    pub total_investment_amount: Decimal,
    pub total_profit_or_loss_rate: Decimal,
    pub category_breakdown: Vec<CategorySlice>,
}

impl PortfolioSummary {
    pub fn from_positions(positions: &[Position]) -> Self {
        let total_assets: Decimal = positions
            .iter()
            .filter(|p| !p.is_liability())
            .map(|p| p.value)
            .sum();
        let total_liabilities: Decimal = positions
            .iter()
            .filter(|p| p.is_liability())
            .map(|p| p.value)
            .sum();

        let total_profit_or_loss: Decimal =
            positions.iter().filter_map(|p| p.profit_or_loss).sum();
        let total_investment_amount: Decimal = positions
            .iter()
            .filter(|p| p.instrument_type.is_tradable())
            .filter_map(|p| p.purchase_amount)
            .sum();

        PortfolioSummary {
            total_assets,
            total_liabilities,
            net_worth: total_assets.saturating_add(total_liabilities),
            total_profit_or_loss,
            total_investment_amount,
            total_profit_or_loss_rate: total_profit_or_loss.ratio_or_zero(total_investment_amount),
            category_breakdown: category_breakdown(positions),
        }
    }
}

/// Positive non-liability values summed per type, in first-seen order.
///
/// Zero and negative values are left out entirely so every slice is drawable.
pub fn category_breakdown(positions: &[Position]) -> Vec<CategorySlice> {
    let mut totals: Vec<(InstrumentType, Decimal)> = Vec::new();
    for position in positions {
        if position.is_liability() || !position.value.is_positive() {
            continue;
        }
        match totals
            .iter_mut()
            .find(|(category, _)| *category == position.instrument_type)
        {
            Some((_, total)) => *total = total.saturating_add(position.value),
            None => totals.push((position.instrument_type, position.value)),
        }
    }

    let grand_total: Decimal = totals.iter().map(|(_, v)| *v).sum();
    totals
        .into_iter()
        .map(|(category, value)| CategorySlice {
            category,
            value,
            share: value.ratio_or_zero(grand_total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn pos(name: &str, t: InstrumentType, value: &str) -> Position {
        Position::new(name, t, d(value), 0)
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = PortfolioSummary::from_positions(&[]);
        assert_eq!(summary.total_assets, Decimal::zero());
        assert_eq!(summary.net_worth, Decimal::zero());
        assert_eq!(summary.total_profit_or_loss_rate, Decimal::zero());
        assert!(summary.category_breakdown.is_empty());
    }

    #[test]
    fn test_breakdown_first_seen_order_and_share() {
        let positions = vec![
            pos("a", InstrumentType::Stocks, "300"),
            pos("b", InstrumentType::Cash, "100"),
            pos("c", InstrumentType::Stocks, "600"),
        ];
        let breakdown = category_breakdown(&positions);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, InstrumentType::Stocks);
        assert_eq!(breakdown[0].value, d("900"));
        assert_eq!(breakdown[0].share, d("0.9"));
        assert_eq!(breakdown[1].category, InstrumentType::Cash);
        assert_eq!(breakdown[1].share, d("0.1"));
    }

    #[test]
    fn test_breakdown_skips_non_positive_and_liabilities() {
        let positions = vec![
            pos("loan", InstrumentType::Liability, "5000"),
            pos("margin", InstrumentType::MarginStocks, "-200"),
            pos("empty", InstrumentType::Cash, "0"),
        ];
        assert!(category_breakdown(&positions).is_empty());
    }
}
