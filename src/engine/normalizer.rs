//! Raw asset rows to typed positions.

use crate::domain::{Decimal, InstrumentType, Position};
use crate::engine::coerce::coerce_field;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Normalize every usable row, dropping rows without a name.
///
/// Ids use the index among kept rows, so they stay dense.
pub fn normalize_records(rows: &[Value]) -> Vec<Position> {
    let mut positions = Vec::with_capacity(rows.len());
    for (row_number, row) in rows.iter().enumerate() {
        match normalize_record(row, positions.len()) {
            Some(position) => positions.push(position),
            None => debug!(row = row_number, "Dropping asset row without a name"),
        }
    }
    positions
}

/// Normalize one row. `None` when the row is not an object or has no name.
pub fn normalize_record(raw: &Value, index: usize) -> Option<Position> {
    let row = raw.as_object()?;
    let name = text_field(row, "name")?;
    let instrument_type = instrument_type(row, &name);

    let raw_value = coerce_field(row.get("value"));
    let shares = coerce_field(row.get("shares"));
    let avg_purchase_price = coerce_field(row.get("avgPurchasePrice"));
    let current_price = coerce_field(row.get("currentPrice"));

    let valuation = valuation(
        instrument_type,
        shares,
        avg_purchase_price,
        current_price,
        raw_value,
    );
    if let Valuation::Overflowed(fallback) = valuation {
        debug!(
            asset = %name,
            fallback = %fallback,
            "Price valuation overflowed, using supplied value"
        );
    }
    let value = valuation.value();

    let mut position = Position::new(name, instrument_type, value, index);
    position.account = text_field(row, "account");
    position.owner = text_field(row, "owner");

    if instrument_type.is_tradable() {
        position.ticker_symbol = text_field(row, "tickerSymbol");
        position.shares = shares;
        position.avg_purchase_price = avg_purchase_price;
        position.current_price = current_price;
        position.day_change = coerce_field(row.get("dayChange"));

        let derived = match valuation {
            Valuation::Overflowed(_) => None,
            _ => profit_and_loss(instrument_type, value, shares, avg_purchase_price),
        };
        if let Some((purchase, profit, rate)) = derived {
            position.purchase_amount = Some(purchase);
            position.profit_or_loss = Some(profit);
            position.profit_or_loss_rate = Some(rate);
        }
    }

    Some(position)
}

/// Where a position's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Valuation {
    /// Computed from shares and prices.
    Priced(Decimal),
    /// The row's own `value` cell, or 0.
    Supplied(Decimal),
    /// Price inputs were complete but the product overflowed. Carries the
    /// supplied value; no profit/loss is derived from it.
    Overflowed(Decimal),
}

impl Valuation {
    pub fn value(self) -> Decimal {
        match self {
            Valuation::Priced(v) | Valuation::Supplied(v) | Valuation::Overflowed(v) => v,
        }
    }
}

/// Price-based valuation where the inputs allow it, else the supplied value, else 0.
///
/// Delta-priced types need all three inputs; a partial delta is never applied.
pub fn valuation(
    instrument_type: InstrumentType,
    shares: Option<Decimal>,
    avg_purchase_price: Option<Decimal>,
    current_price: Option<Decimal>,
    raw_value: Option<Decimal>,
) -> Valuation {
    let computed = match (shares, current_price, avg_purchase_price) {
        (Some(shares), Some(current), Some(avg)) if instrument_type.is_delta_priced() => Some(
            current
                .checked_sub(avg)
                .and_then(|delta| delta.checked_mul(shares)),
        ),
        (Some(shares), Some(current), _) if instrument_type.is_mark_to_market() => {
            Some(current.checked_mul(shares))
        }
        _ => None,
    };
    let supplied = raw_value.unwrap_or_default();
    match computed {
        Some(Some(value)) => Valuation::Priced(value),
        Some(None) => Valuation::Overflowed(supplied),
        None => Valuation::Supplied(supplied),
    }
}

/// `(purchase_amount, profit_or_loss, profit_or_loss_rate)` for tradable types
/// with both shares and average price known.
pub fn profit_and_loss(
    instrument_type: InstrumentType,
    value: Decimal,
    shares: Option<Decimal>,
    avg_purchase_price: Option<Decimal>,
) -> Option<(Decimal, Decimal, Decimal)> {
    if !instrument_type.is_tradable() {
        return None;
    }
    let purchase = shares?.checked_mul(avg_purchase_price?)?;
    let profit = if instrument_type.is_delta_priced() {
        value
    } else {
        value.checked_sub(purchase)?
    };
    let rate = if purchase.is_zero() {
        Decimal::zero()
    } else {
        profit.checked_div(purchase)?
    };
    Some((purchase, profit, rate))
}

fn instrument_type(row: &Map<String, Value>, name: &str) -> InstrumentType {
    match row.get("type").and_then(Value::as_str) {
        Some(label) => label.parse().unwrap_or_else(|e| {
            warn!(asset = name, error = %e, "Treating asset as other");
            InstrumentType::Other
        }),
        None => {
            warn!(asset = name, "Asset row has no type, treating as other");
            InstrumentType::Other
        }
    }
}

/// Non-empty text; numeric cells are kept as their printed form.
fn text_field(row: &Map<String, Value>, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
