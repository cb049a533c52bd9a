//! Lossless decimal numeric type backed by rust_decimal.
//!
//! Provides canonical parsing from strings, formatting without exponent notation,
//! and the checked arithmetic the engine uses so overflow degrades to "absent".

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_SCALE: u32 = 28;

/// Lossless decimal numeric type for balances, prices and quantities.
///
/// Backed by rust_decimal to avoid floating-point drift.
/// Serializes to JSON number (not string).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a Decimal from a plain decimal string (`-12.5`, `1000`).
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// `self * 10^exp`.
    ///
    /// `None` when the result overflows. Digits past 28 decimal places are
    /// rounded away, so very small magnitudes become zero.
    pub fn checked_scale_pow10(self, exp: i64) -> Option<Decimal> {
        if self.is_zero() {
            return Some(self);
        }
        let ten = RustDecimal::TEN;
        let mut value = self.0;

        if exp >= 0 {
            // Overflows within a few dozen steps for any non-zero value.
            for _ in 0..exp {
                value = value.checked_mul(ten)?;
            }
            return Some(Decimal(value));
        }

        let target_scale = u64::from(value.scale()).saturating_add(exp.unsigned_abs());
        if target_scale <= u64::from(MAX_SCALE) {
            value.set_scale(target_scale as u32).ok()?;
            return Some(Decimal(value));
        }

        value.set_scale(MAX_SCALE).ok()?;
        let mut remaining = target_scale - u64::from(MAX_SCALE);
        while remaining > 0 && !value.is_zero() {
            value = value.checked_div(ten).unwrap_or(RustDecimal::ZERO);
            remaining -= 1;
        }
        if value.is_zero() {
            return Some(Decimal::zero());
        }
        Some(Decimal(value))
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    pub fn checked_sub(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_sub(rhs.0).map(Decimal)
    }

    pub fn checked_mul(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_mul(rhs.0).map(Decimal)
    }

    /// Checked division; `None` on a zero divisor or overflow.
    pub fn checked_div(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_div(rhs.0).map(Decimal)
    }

    /// Addition clamped at the representable range.
    pub fn saturating_add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(rhs.0))
    }

    /// `self / rhs`, or zero when the divisor is zero or the quotient overflows.
    pub fn ratio_or_zero(self, rhs: Decimal) -> Decimal {
        if rhs.is_zero() {
            return Decimal::zero();
        }
        self.checked_div(rhs).unwrap_or_default()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

// Aggregates saturate instead of panicking on pathological inputs.
impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::zero(), Decimal::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Decimal {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_decimal_canonical_no_exponent() {
        let decimal = d("1.5").checked_scale_pow10(3).expect("scale failed");
        let formatted = decimal.to_string();
        assert!(!formatted.contains('e'));
        assert_eq!(formatted, "1500");
    }

    #[test]
    fn test_scale_pow10() {
        assert_eq!(d("2.5").checked_scale_pow10(-2), Some(d("0.025")));
        assert_eq!(d("1").checked_scale_pow10(-28), Some(d("0.0000000000000000000000000001")));
        assert_eq!(d("0").checked_scale_pow10(i64::MAX), Some(Decimal::zero()));
        assert_eq!(d("1").checked_scale_pow10(400), None);
    }

    #[test]
    fn test_scale_pow10_underflow_rounds() {
        // 1.5e-28 rounds to the finest step rather than disappearing.
        assert!(d("1.5").checked_scale_pow10(-28).unwrap().is_positive());
        assert_eq!(d("1").checked_scale_pow10(-29), Some(Decimal::zero()));
        assert_eq!(d("123").checked_scale_pow10(-300), Some(Decimal::zero()));
        assert_eq!(d("-7").checked_scale_pow10(i64::MIN), Some(Decimal::zero()));
    }

    #[test]
    fn test_decimal_canonical_strips_trailing_zeros() {
        assert_eq!(d("12.500").to_canonical_string(), "12.5");
    }

    #[test]
    fn test_decimal_checked_arithmetic() {
        let a = d("10.5");
        let b = d("2.5");

        assert_eq!(a.checked_sub(b), Some(d("8")));
        assert_eq!(a.checked_mul(b), Some(d("26.25")));
        assert_eq!(a.checked_div(b), Some(d("4.2")));
        assert_eq!(a.checked_div(Decimal::zero()), None);
    }

    #[test]
    fn test_decimal_mul_overflow_is_none() {
        let max = Decimal::new(RustDecimal::MAX);
        assert_eq!(max.checked_mul(d("2")), None);
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(d("5000").ratio_or_zero(d("10000")), d("0.5"));
        assert_eq!(d("5000").ratio_or_zero(Decimal::zero()), Decimal::zero());
    }

    #[test]
    fn test_sum_saturates() {
        let max = Decimal::new(RustDecimal::MAX);
        let total: Decimal = vec![max, max].into_iter().sum();
        assert_eq!(total, max);

        let small: Decimal = [d("1"), d("2.5"), d("-0.5")].iter().sum();
        assert_eq!(small, d("3"));
    }

    #[test]
    fn test_decimal_json_serialization() {
        let json = serde_json::to_value(d("123.456")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_sign_predicates() {
        assert!(d("1").is_positive());
        assert!(!Decimal::zero().is_positive());
        assert!(!d("-1").is_positive());
    }
}
