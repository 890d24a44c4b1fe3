//! Dashboard-level rollups: headline statistics, category split and search

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::GroupingKey;
use super::expiry::{classify_expiry_at, parse_expiry_date, ExpiryStatus};
use super::record::InventoryRecord;
use crate::types::SortDirection;

/// Headline numbers shown above the inventory table
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub total_value: Decimal,
    pub total_quantity: i64,
    pub expiring_count: u32,
    pub expired_count: u32,
    pub unique_products: usize,
    /// Batches whose expiry date could not be read
    pub unreadable_expiry_count: u32,
}

pub fn dashboard_stats(records: &[InventoryRecord], now: NaiveDateTime) -> DashboardStats {
    dashboard_stats_with(records, now, GroupingKey::Exact)
}

/// Headline numbers, counting products under the given grouping policy
pub fn dashboard_stats_with(
    records: &[InventoryRecord],
    now: NaiveDateTime,
    grouping: GroupingKey,
) -> DashboardStats {
    let mut stats = DashboardStats {
        total_items: records.len(),
        total_value: Decimal::ZERO,
        total_quantity: 0,
        expiring_count: 0,
        expired_count: 0,
        unique_products: 0,
        unreadable_expiry_count: 0,
    };
    let mut products: HashSet<String> = HashSet::new();

    for record in records {
        stats.total_value = stats.total_value.saturating_add(record.value_amount());
        stats.total_quantity = stats.total_quantity.saturating_add(record.on_hand());

        match classify_expiry_at(&record.expiry_date, now).status {
            ExpiryStatus::Expired => stats.expired_count += 1,
            ExpiryStatus::ExpiringSoon => stats.expiring_count += 1,
            ExpiryStatus::Error => stats.unreadable_expiry_count += 1,
            ExpiryStatus::Attention | ExpiryStatus::Good => {}
        }

        products.insert(grouping.key_for(record.base_product_name()));
    }

    stats.unique_products = products.len();
    stats
}

/// Dosage-form category inferred from the product name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductCategory {
    Tablets,
    Capsules,
    Injections,
    #[serde(rename = "Oral Liquids")]
    OralLiquids,
    Other,
}

impl ProductCategory {
    pub fn classify(particulars: &str) -> Self {
        let name = particulars.to_lowercase();
        if name.contains("tablet") {
            ProductCategory::Tablets
        } else if name.contains("capsule") {
            ProductCategory::Capsules
        } else if name.contains("injection") || name.contains("inj") {
            ProductCategory::Injections
        } else if name.contains("drops") || name.contains("suspension") || name.contains("oral") {
            ProductCategory::OralLiquids
        } else {
            ProductCategory::Other
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Tablets => write!(f, "Tablets"),
            ProductCategory::Capsules => write!(f, "Capsules"),
            ProductCategory::Injections => write!(f, "Injections"),
            ProductCategory::OralLiquids => write!(f, "Oral Liquids"),
            ProductCategory::Other => write!(f, "Other"),
        }
    }
}

/// Batch count and value for one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub name: ProductCategory,
    pub count: u32,
    pub value: Decimal,
}

/// Categories present in the data, in declaration order
pub fn category_distribution(records: &[InventoryRecord]) -> Vec<CategoryShare> {
    let mut shares: BTreeMap<ProductCategory, CategoryShare> = BTreeMap::new();

    for record in records {
        let category = ProductCategory::classify(&record.particulars);
        let share = shares.entry(category).or_insert_with(|| CategoryShare {
            name: category,
            count: 0,
            value: Decimal::ZERO,
        });
        share.count += 1;
        share.value = share.value.saturating_add(record.value_amount());
    }

    shares.into_values().collect()
}

/// Case-insensitive substring search over particulars and batch code.
pub fn filter_records<'a>(records: &'a [InventoryRecord], query: &str) -> Vec<&'a InventoryRecord> {
    let query = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            query.is_empty()
                || record.particulars.to_lowercase().contains(&query)
                || record.particular_id.to_lowercase().contains(&query)
        })
        .collect()
}

/// Column of the batch table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecordSortField {
    Particulars,
    ParticularId,
    ManufacturingDate,
    ExpiryDate,
    Quantity,
    Rate,
    Value,
}

fn compare_dates(a: &str, b: &str, direction: SortDirection) -> Ordering {
    // Unreadable dates stay at the bottom in both directions
    match (parse_expiry_date(a).ok(), parse_expiry_date(b).ok()) {
        (Some(lhs), Some(rhs)) => direction.apply(lhs.cmp(&rhs)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort of batches by one table column.
pub fn sort_records(records: &mut [InventoryRecord], field: RecordSortField, direction: SortDirection) {
    records.sort_by(|a, b| match field {
        RecordSortField::Particulars => direction.apply(a.particulars.cmp(&b.particulars)),
        RecordSortField::ParticularId => direction.apply(a.particular_id.cmp(&b.particular_id)),
        RecordSortField::ManufacturingDate => {
            compare_dates(&a.manufacturing_date, &b.manufacturing_date, direction)
        }
        RecordSortField::ExpiryDate => compare_dates(&a.expiry_date, &b.expiry_date, direction),
        RecordSortField::Quantity => direction.apply(a.on_hand().cmp(&b.on_hand())),
        RecordSortField::Rate => direction.apply(a.rate_amount().cmp(&b.rate_amount())),
        RecordSortField::Value => direction.apply(a.value_amount().cmp(&b.value_amount())),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::QuantityField;
    use crate::types::Amount;
    use chrono::NaiveDate;

    fn batch(particulars: &str, lot: &str, expiry: &str, quantity: QuantityField, value: i64) -> InventoryRecord {
        InventoryRecord {
            id: lot.to_string(),
            particulars: particulars.to_string(),
            particular_id: lot.to_string(),
            manufacturing_date: "01-Jan-23".to_string(),
            expiry_date: expiry.to_string(),
            type_of_good: Some("Finished Goods".to_string()),
            quantity,
            rate: Amount::default(),
            value: Amount::Number(Decimal::from(value)),
            minimum_stock: None,
            monthly_avg_sales: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            batch("Norifer Injection - 10ml", "ES0625001E", "31-Dec-26", 1494i64.into(), 1000),
            batch("Norifer Injection - 10ml", "ES0924004", "28-Feb-25", 639i64.into(), 500),
            batch("Lutin 250 Inj - 1ml (TRD)", "CPI240154", "30-Nov-24", "5654 amp".into(), 250),
            batch("Neptin M Tablets - 10's", "NTPT2401", "garbage", 812i64.into(), 100),
        ]
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = dashboard_stats(&sample(), now());
        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.total_value, Decimal::from(1850));
        assert_eq!(stats.total_quantity, 1494 + 639 + 5654 + 812);
        assert_eq!(stats.expiring_count, 1);
        assert_eq!(stats.expired_count, 1);
        assert_eq!(stats.unreadable_expiry_count, 1);
        assert_eq!(stats.unique_products, 3);
    }

    #[test]
    fn test_dashboard_stats_empty() {
        let stats = dashboard_stats(&[], now());
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.unique_products, 0);
    }

    #[test]
    fn test_unique_products_follow_grouping() {
        let records = vec![
            batch("Neptin M Tablets - 10's", "NTPT2401", "31-Dec-26", 10i64.into(), 10),
            batch("neptin m tablets  - 10's", "NTPT2402", "31-Dec-26", 10i64.into(), 10),
        ];
        assert_eq!(dashboard_stats(&records, now()).unique_products, 2);

        let normalized = dashboard_stats_with(&records, now(), GroupingKey::Normalized);
        assert_eq!(normalized.unique_products, 1);
        assert_eq!(
            normalized.unique_products,
            crate::aggregate_by_product_with(&records, GroupingKey::Normalized).len()
        );
    }

    #[test]
    fn test_values_saturate_instead_of_overflowing() {
        let mut records = sample();
        records[0].value = Amount::Number(Decimal::MAX);

        let stats = dashboard_stats(&records, now());
        assert_eq!(stats.total_value, Decimal::MAX);

        let shares = category_distribution(&records);
        assert_eq!(shares[1].value, Decimal::MAX);
    }

    #[test]
    fn test_sort_records_by_quantity() {
        let mut records = sample();
        sort_records(&mut records, RecordSortField::Quantity, SortDirection::Desc);
        let lots: Vec<&str> = records.iter().map(|r| r.particular_id.as_str()).collect();
        assert_eq!(lots, vec!["CPI240154", "ES0625001E", "NTPT2401", "ES0924004"]);
    }

    #[test]
    fn test_sort_records_by_expiry_keeps_unreadable_last() {
        let mut records = sample();
        sort_records(&mut records, RecordSortField::ExpiryDate, SortDirection::Asc);
        let lots: Vec<&str> = records.iter().map(|r| r.particular_id.as_str()).collect();
        assert_eq!(lots, vec!["CPI240154", "ES0924004", "ES0625001E", "NTPT2401"]);

        sort_records(&mut records, RecordSortField::ExpiryDate, SortDirection::Desc);
        let lots: Vec<&str> = records.iter().map(|r| r.particular_id.as_str()).collect();
        assert_eq!(lots, vec!["ES0625001E", "ES0924004", "CPI240154", "NTPT2401"]);
    }

    #[test]
    fn test_category_classification() {
        assert_eq!(ProductCategory::classify("Gapad-10 Tablets - 10's"), ProductCategory::Tablets);
        assert_eq!(ProductCategory::classify("JABEZ Capsules - 10's"), ProductCategory::Capsules);
        assert_eq!(ProductCategory::classify("Lutin 250 Inj - 1ml"), ProductCategory::Injections);
        assert_eq!(ProductCategory::classify("Asphyllin LS Drops - 15ml"), ProductCategory::OralLiquids);
        assert_eq!(ProductCategory::classify("Sterile Water"), ProductCategory::Other);
    }

    #[test]
    fn test_category_distribution() {
        let shares = category_distribution(&sample());
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, ProductCategory::Tablets);
        assert_eq!(shares[0].count, 1);
        assert_eq!(shares[1].name, ProductCategory::Injections);
        assert_eq!(shares[1].count, 3);
        assert_eq!(shares[1].value, Decimal::from(1750));
    }

    #[test]
    fn test_filter_records() {
        let records = sample();
        assert_eq!(filter_records(&records, "norifer").len(), 2);
        assert_eq!(filter_records(&records, "cpi2401").len(), 1);
        assert_eq!(filter_records(&records, "  ").len(), 4);
        assert!(filter_records(&records, "paracetamol").is_empty());
    }

    #[test]
    fn test_category_serializes_display_name() {
        let json = serde_json::to_string(&ProductCategory::OralLiquids).unwrap();
        assert_eq!(json, "\"Oral Liquids\"");
    }
}
