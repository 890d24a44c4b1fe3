//! Quantity normalization
//!
//! Inventory exports mix plain counts (`4979`) with counts carrying a unit
//! suffix (`"5654 amp"`). The on-hand count is always the leading integer.

use serde::{Deserialize, Serialize};

/// Raw quantity field as found in a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuantityField {
    Count(i64),
    Text(String),
}

impl QuantityField {
    /// Normalized on-hand count
    pub fn on_hand(&self) -> i64 {
        normalize_quantity(self)
    }
}

impl From<i64> for QuantityField {
    fn from(count: i64) -> Self {
        QuantityField::Count(count)
    }
}

impl From<&str> for QuantityField {
    fn from(text: &str) -> Self {
        QuantityField::Text(text.to_string())
    }
}

impl std::fmt::Display for QuantityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityField::Count(count) => write!(f, "{}", count),
            QuantityField::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Extract the on-hand count from a quantity field.
///
/// Numeric input is returned unchanged. Text input yields its leading run of
/// ASCII digits, or 0 when it does not start with a digit.
pub fn normalize_quantity(raw: &QuantityField) -> i64 {
    match raw {
        QuantityField::Count(count) => *count,
        QuantityField::Text(text) => leading_integer(text),
    }
}

/// Leading run of ASCII digits parsed as an integer, 0 if absent.
///
/// Runs too long for `i64` saturate rather than fail.
pub fn leading_integer(text: &str) -> i64 {
    let digits = text.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    for digit in digits {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }
    value
}
