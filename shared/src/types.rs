//! Common types used across the platform

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary field (`rate`, `value`) that may arrive as a number or a
/// numeric string.
///
/// Strings that do not parse are kept verbatim and read as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Number(Decimal),
    Text(String),
}

impl Amount {
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Amount::Number(value) => *value,
            Amount::Text(text) => Decimal::from_str(text.trim()).unwrap_or(Decimal::ZERO),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(Decimal::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Number(value)
    }
}

/// Sort direction for tabular views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Orient an ascending comparison
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_from_number_and_string() {
        let number: Amount = serde_json::from_str("60793.59").unwrap();
        assert_eq!(number.to_decimal(), Decimal::new(6079359, 2));

        let text: Amount = serde_json::from_str("\"9882\"").unwrap();
        assert_eq!(text.to_decimal(), Decimal::from(9882));
    }

    #[test]
    fn test_unparseable_amount_is_zero() {
        let text: Amount = serde_json::from_str("\"n/a\"").unwrap();
        assert_eq!(text, Amount::Text("n/a".to_string()));
        assert_eq!(text.to_decimal(), Decimal::ZERO);
    }
}
