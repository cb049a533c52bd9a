//! Lenient numeric coercion for spreadsheet cells.
//!
//! Cells arrive as JSON numbers, numeric strings, blanks, or junk. Anything
//! without a usable number, or too large to represent, is `None`; values
//! below the finest representable step round to zero.

use crate::domain::Decimal;
use rust_decimal::Decimal as RustDecimal;
use serde_json::Value;

/// Coerce a raw cell to a decimal, or `None` when it carries no usable number.
///
/// Strings are read up to the longest leading decimal literal, so `"12abc"`
/// yields 12 and `"abc"` yields `None`.
pub fn coerce_number(raw: &Value) -> Option<Decimal> {
    coerce_with(raw, parse_lenient)
}

/// Like [`coerce_number`], but a string must be a decimal literal in full
/// (surrounding whitespace aside): `"12abc"` and `"1,000"` yield `None`.
///
/// History cells are read this way.
pub fn coerce_strict(raw: &Value) -> Option<Decimal> {
    coerce_with(raw, parse_strict)
}

/// Coerce an optional cell, treating a missing key like a blank one.
pub fn coerce_field(raw: Option<&Value>) -> Option<Decimal> {
    raw.and_then(coerce_number)
}

fn coerce_with(raw: &Value, parse: fn(&str) -> Option<Decimal>) -> Option<Decimal> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::new(RustDecimal::from(u)))
            } else {
                parse_lenient(&n.to_string())
            }
        }
        Value::String(s) => parse(s),
        _ => None,
    }
}

/// Parse the leading decimal literal of `s`, ignoring leading whitespace.
pub fn parse_lenient(s: &str) -> Option<Decimal> {
    leading_literal(s.trim_start())?.value()
}

/// Parse `s` as exactly one decimal literal, ignoring surrounding whitespace.
pub fn parse_strict(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let literal = leading_literal(s)?;
    if literal.len != s.len() {
        return None;
    }
    literal.value()
}

struct Literal<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: Option<(bool, &'a str)>,
    /// Bytes consumed from the input.
    len: usize,
}

impl Literal<'_> {
    /// Out-of-range exponents overflow to `None` or round down to zero.
    fn value(&self) -> Option<Decimal> {
        let mut mantissa = String::new();
        if self.negative {
            mantissa.push('-');
        }
        mantissa.push_str(if self.int_digits.is_empty() { "0" } else { self.int_digits });
        if !self.frac_digits.is_empty() {
            mantissa.push('.');
            mantissa.push_str(self.frac_digits);
        }
        let mantissa = Decimal::from_str_canonical(&mantissa).ok()?;

        match self.exponent {
            None => Some(mantissa),
            Some((negative, digits)) => {
                let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
                mantissa.checked_scale_pow10(if negative { -magnitude } else { magnitude })
            }
        }
    }
}

fn leading_literal(s: &str) -> Option<Literal<'_>> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    let int_end = digits_from(i);
    let int_digits = &s[i..int_end];
    i = int_end;

    let mut frac_digits = "";
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        frac_digits = &s[i + 1..frac_end];
        i = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = None;
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        let exp_negative = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let exp_end = digits_from(j);
        if exp_end > j {
            exponent = Some((exp_negative, &s[j..exp_end]));
            i = exp_end;
        }
    }

    Some(Literal {
        negative,
        int_digits,
        frac_digits,
        exponent,
        len: i,
    })
}
