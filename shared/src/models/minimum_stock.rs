//! Minimum-stock sheets and the low-stock report
//!
//! A minimum-stock sheet lists products by name with their reorder
//! threshold and average monthly sales. Sheet names rarely match the
//! inventory's particulars exactly, so matching is done on a loosened form
//! of both names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate_by_product_with, GroupingKey, ProductAggregate};
use super::record::InventoryRecord;
use super::reorder::{plan_reorders, ReorderPlanItem};

/// One row of a minimum-stock sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MinimumStockRow {
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing: Option<String>,
    #[serde(default)]
    pub monthly_avg_sales: i64,
    pub minimum_stock: i64,
}

/// Records with thresholds applied, plus sheet rows that matched nothing
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<InventoryRecord>,
    pub unmatched: Vec<MinimumStockRow>,
}

/// Lowercase, hyphens as spaces, trimmed
pub fn normalize_product_name(name: &str) -> String {
    name.to_lowercase().replace('-', " ").trim().to_string()
}

fn row_matches(row_name: &str, record: &InventoryRecord) -> bool {
    if row_name.is_empty() {
        return false;
    }
    normalize_product_name(record.base_product_name()) == row_name
        || normalize_product_name(&record.particulars).contains(row_name)
}

/// Apply sheet thresholds to the records they name.
///
/// When several rows match a record the largest minimum stock and the
/// largest monthly sales win.
pub fn merge_minimum_stock(records: Vec<InventoryRecord>, rows: &[MinimumStockRow]) -> MergeOutcome {
    let row_names: Vec<String> = rows
        .iter()
        .map(|row| normalize_product_name(&row.product_name))
        .collect();
    let mut matched = vec![false; rows.len()];

    let records = records
        .into_iter()
        .map(|mut record| {
            let mut minimum: Option<i64> = None;
            let mut monthly: Option<i64> = None;

            for (index, row) in rows.iter().enumerate() {
                if row_matches(&row_names[index], &record) {
                    matched[index] = true;
                    minimum = Some(minimum.map_or(row.minimum_stock, |m| m.max(row.minimum_stock)));
                    monthly = Some(monthly.map_or(row.monthly_avg_sales, |m| m.max(row.monthly_avg_sales)));
                }
            }

            if minimum.is_some() {
                record.minimum_stock = minimum;
                record.monthly_avg_sales = monthly;
            }
            record
        })
        .collect();

    let unmatched = rows
        .iter()
        .zip(matched)
        .filter(|(_, was_matched)| !was_matched)
        .map(|(row, _)| row.clone())
        .collect();

    MergeOutcome { records, unmatched }
}

/// Reorder plan for an inventory export checked against a minimum-stock sheet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub low_stock_items: Vec<ReorderPlanItem>,
    pub count: usize,
    /// Sheet products with no batch in the inventory
    pub missing_products: Vec<String>,
}

/// Merge the sheet into the records, aggregate, and plan reorders.
///
/// Sheet products absent from the inventory are treated as zero stock.
pub fn low_stock_report(
    records: Vec<InventoryRecord>,
    rows: &[MinimumStockRow],
    grouping: GroupingKey,
) -> (Vec<InventoryRecord>, LowStockReport) {
    let MergeOutcome { records, unmatched } = merge_minimum_stock(records, rows);

    let mut aggregates = aggregate_by_product_with(&records, grouping);
    let missing_products: Vec<String> = unmatched
        .iter()
        .filter(|row| row.minimum_stock > 0)
        .map(|row| row.product_name.trim().to_string())
        .collect();

    aggregates.extend(unmatched.iter().filter(|row| row.minimum_stock > 0).map(|row| {
        ProductAggregate::new(
            row.product_name.trim(),
            0,
            row.minimum_stock,
            0,
            Decimal::ZERO,
            row.monthly_avg_sales,
        )
    }));

    let low_stock_items = plan_reorders(&aggregates);
    let report = LowStockReport {
        count: low_stock_items.len(),
        low_stock_items,
        missing_products,
    };
    (records, report)
}
