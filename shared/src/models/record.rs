//! Inventory line items (batches)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quantity::QuantityField;
use crate::types::Amount;

/// Delimiter between the base product name and its packaging descriptor
pub const PACKAGING_DELIMITER: &str = " - ";

/// A single batch of a product as held in the inventory snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: String,
    /// Display name, e.g. "Norifer Injection - 10ml"
    pub particulars: String,
    /// Batch/lot code
    pub particular_id: String,
    /// DD-MMM-YY
    pub manufacturing_date: String,
    /// DD-MMM-YY
    pub expiry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_good: Option<String>,
    pub quantity: QuantityField,
    #[serde(default)]
    pub rate: Amount,
    /// Taken as authoritative, never recomputed from quantity and rate
    #[serde(default)]
    pub value: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_avg_sales: Option<i64>,
}

impl InventoryRecord {
    /// Grouping key derived from `particulars`
    pub fn base_product_name(&self) -> &str {
        base_product_name(&self.particulars)
    }

    /// Normalized on-hand count
    pub fn on_hand(&self) -> i64 {
        self.quantity.on_hand()
    }

    pub fn value_amount(&self) -> Decimal {
        self.value.to_decimal()
    }

    pub fn rate_amount(&self) -> Decimal {
        self.rate.to_decimal()
    }
}

/// Substring of `particulars` before the first `" - "`, or the whole string
/// when the delimiter is absent.
pub fn base_product_name(particulars: &str) -> &str {
    particulars
        .split_once(PACKAGING_DELIMITER)
        .map_or(particulars, |(base, _)| base)
}
