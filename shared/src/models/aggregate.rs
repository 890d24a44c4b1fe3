//! Per-product rollups over batches

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::InventoryRecord;
use crate::types::SortDirection;

/// Stock level relative to the product's minimum threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Below minimum
    Danger,
    /// Within 25% above minimum
    Warning,
    Good,
}

impl StockStatus {
    pub fn from_gap(gap: i64, minimum_stock: i64) -> Self {
        if gap < 0 {
            StockStatus::Danger
        } else if gap.saturating_mul(4) < minimum_stock {
            StockStatus::Warning
        } else {
            StockStatus::Good
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Danger => write!(f, "danger"),
            StockStatus::Warning => write!(f, "warning"),
            StockStatus::Good => write!(f, "good"),
        }
    }
}

/// How the base product name is turned into a grouping key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupingKey {
    /// Byte-for-byte match on the base name
    #[default]
    Exact,
    /// Trimmed and case-folded base name
    Normalized,
}

impl GroupingKey {
    pub fn key_for(&self, base_name: &str) -> String {
        match self {
            GroupingKey::Exact => base_name.to_string(),
            GroupingKey::Normalized => base_name.trim().to_lowercase(),
        }
    }

    pub fn display_for<'a>(&self, base_name: &'a str) -> &'a str {
        match self {
            GroupingKey::Exact => base_name,
            GroupingKey::Normalized => base_name.trim(),
        }
    }
}

/// Rollup of all batches sharing a base product name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub name: String,
    pub current_stock: i64,
    /// Largest per-batch minimum, not the sum
    pub minimum_stock: i64,
    pub batch_count: u32,
    pub gap: i64,
    pub status: StockStatus,
    pub total_value: Decimal,
    pub monthly_avg_sales: i64,
    /// Months of runway; absent when there are no recorded sales
    pub coverage_months: Option<f64>,
}

impl ProductAggregate {
    pub fn new(
        name: impl Into<String>,
        current_stock: i64,
        minimum_stock: i64,
        batch_count: u32,
        total_value: Decimal,
        monthly_avg_sales: i64,
    ) -> Self {
        let gap = current_stock.saturating_sub(minimum_stock);
        let coverage_months = if monthly_avg_sales > 0 {
            Some(current_stock as f64 / monthly_avg_sales as f64)
        } else {
            None
        };

        Self {
            name: name.into(),
            current_stock,
            minimum_stock,
            batch_count,
            gap,
            status: StockStatus::from_gap(gap, minimum_stock),
            total_value,
            monthly_avg_sales,
            coverage_months,
        }
    }

    pub fn needs_reorder(&self) -> bool {
        self.current_stock < self.minimum_stock
    }
}

#[derive(Default)]
struct Accumulator {
    display_name: String,
    current_stock: i64,
    minimum_stock: i64,
    batch_count: u32,
    total_value: Decimal,
    monthly_avg_sales: i64,
}

impl Accumulator {
    fn add(&mut self, display_name: &str, record: &InventoryRecord) {
        // Keep the smallest spelling so the chosen name does not depend on input order.
        if self.batch_count == 0 || display_name < self.display_name.as_str() {
            self.display_name = display_name.to_string();
        }
        self.current_stock = self.current_stock.saturating_add(record.on_hand());
        self.minimum_stock = self.minimum_stock.max(record.minimum_stock.unwrap_or(0));
        self.monthly_avg_sales = self
            .monthly_avg_sales
            .max(record.monthly_avg_sales.unwrap_or(0));
        self.batch_count += 1;
        self.total_value = self.total_value.saturating_add(record.value_amount());
    }

    fn finish(self) -> ProductAggregate {
        ProductAggregate::new(
            self.display_name,
            self.current_stock,
            self.minimum_stock,
            self.batch_count,
            self.total_value,
            self.monthly_avg_sales,
        )
    }
}

/// Group batches by base product name using exact-match keys.
///
/// Output is ordered by product name.
pub fn aggregate_by_product(records: &[InventoryRecord]) -> Vec<ProductAggregate> {
    aggregate_by_product_with(records, GroupingKey::Exact)
}

/// Group batches by base product name using the given key policy.
pub fn aggregate_by_product_with(
    records: &[InventoryRecord],
    grouping: GroupingKey,
) -> Vec<ProductAggregate> {
    let mut aggregates: Vec<ProductAggregate> = aggregate_map(records, grouping).into_values().collect();
    aggregates.sort_by(|a, b| a.name.cmp(&b.name));
    aggregates
}

/// Mapping from grouping key to aggregate
pub fn aggregate_map(
    records: &[InventoryRecord],
    grouping: GroupingKey,
) -> BTreeMap<String, ProductAggregate> {
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();

    for record in records {
        let base = record.base_product_name();
        groups
            .entry(grouping.key_for(base))
            .or_default()
            .add(grouping.display_for(base), record);
    }

    groups
        .into_iter()
        .map(|(key, acc)| (key, acc.finish()))
        .collect()
}

/// Column of the stock level table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortField {
    Name,
    CurrentStock,
    MinimumStock,
    #[default]
    Gap,
    Coverage,
    TotalValue,
}

/// Sort aggregates in place. Products without sales coverage sort as if
/// their coverage were unbounded.
pub fn sort_aggregates(
    aggregates: &mut [ProductAggregate],
    field: ProductSortField,
    direction: SortDirection,
) {
    aggregates.sort_by(|a, b| {
        let ordering = match field {
            ProductSortField::Name => a.name.cmp(&b.name),
            ProductSortField::CurrentStock => a.current_stock.cmp(&b.current_stock),
            ProductSortField::MinimumStock => a.minimum_stock.cmp(&b.minimum_stock),
            ProductSortField::Gap => a.gap.cmp(&b.gap),
            ProductSortField::Coverage => {
                let lhs = a.coverage_months.unwrap_or(f64::INFINITY);
                let rhs = b.coverage_months.unwrap_or(f64::INFINITY);
                lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
            }
            ProductSortField::TotalValue => a.total_value.cmp(&b.total_value),
        };
        direction.apply(ordering)
    });
}

/// Selected-product view: every batch of one base product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub name: String,
    pub batches: u32,
    pub total_quantity: i64,
    pub total_value: Decimal,
    pub items: Vec<InventoryRecord>,
}

/// Collect the batches of the product whose base name is exactly `name`.
pub fn product_detail(records: &[InventoryRecord], name: &str) -> Option<ProductDetail> {
    product_detail_with(records, name, GroupingKey::Exact)
}

/// Collect the batches sharing `name`'s grouping key. The reported name is
/// the one the aggregator shows for the same group.
pub fn product_detail_with(
    records: &[InventoryRecord],
    name: &str,
    grouping: GroupingKey,
) -> Option<ProductDetail> {
    let key = grouping.key_for(name);
    let items: Vec<InventoryRecord> = records
        .iter()
        .filter(|r| grouping.key_for(r.base_product_name()) == key)
        .cloned()
        .collect();

    let display_name = items
        .iter()
        .map(|r| grouping.display_for(r.base_product_name()))
        .min()?
        .to_string();

    Some(ProductDetail {
        name: display_name,
        batches: items.len() as u32,
        total_quantity: items
            .iter()
            .fold(0i64, |total, r| total.saturating_add(r.on_hand())),
        total_value: items
            .iter()
            .fold(Decimal::ZERO, |total, r| total.saturating_add(r.value_amount())),
        items,
    })
}
