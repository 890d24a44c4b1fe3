//! Inventory query service over the current dataset snapshot

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::{
    category_distribution, dashboard_stats_with, expiring_within, expiry_report, filter_records,
    low_stock_report, plan_reorders, product_detail_with, sort_aggregates, sort_records,
    validate_records, CategoryShare, DashboardStats, ExpiryCounts, BatchExpiry, InventoryRecord,
    LowStockReport, MinimumStockRow, ProductAggregate, ProductDetail, ProductSortField,
    RecordSortField, ReorderPlanItem, SortDirection,
};

use crate::error::{AppError, AppResult};
use crate::store::{DatasetSource, InventoryStore};

/// Inventory service answering dashboard queries
#[derive(Clone)]
pub struct InventoryService {
    store: InventoryStore,
}

/// Filters for the product table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub sort: ProductSortField,
    #[serde(default)]
    pub direction: SortDirection,
    /// Keep only the first rows after sorting
    pub limit: Option<usize>,
}

/// Filters for the batch table. Without `sort` the dataset order is kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    pub search: Option<String>,
    pub sort: Option<RecordSortField>,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Dataset replacement summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub version: u64,
    pub source: DatasetSource,
    pub records: usize,
    pub products: usize,
}

/// Expiry view: counts over the whole dataset plus the listed batches
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryOverview {
    pub as_of: NaiveDateTime,
    pub counts: ExpiryCounts,
    pub batches: Vec<BatchExpiry>,
}

/// Midnight of the given day, or the local wall clock when absent
pub fn resolve_now(as_of: Option<NaiveDate>) -> NaiveDateTime {
    match as_of {
        Some(day) => day.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    }
}

impl InventoryService {
    pub fn new(store: InventoryStore) -> Self {
        Self { store }
    }

    /// Records matching a search over particulars and batch codes
    pub async fn list_records(&self, query: &RecordQuery) -> Vec<InventoryRecord> {
        let snapshot = self.store.snapshot().await;
        let mut records: Vec<InventoryRecord> =
            filter_records(&snapshot.records, query.search.as_deref().unwrap_or_default())
                .into_iter()
                .cloned()
                .collect();
        if let Some(field) = query.sort {
            sort_records(&mut records, field, query.direction);
        }
        records
    }

    /// Replace the dataset with caller-supplied records
    pub async fn replace_records(&self, records: Vec<InventoryRecord>) -> AppResult<DatasetSummary> {
        validate_records(&records).map_err(|message| AppError::ValidationError(message.to_string()))?;
        let snapshot = self.store.replace(DatasetSource::Api, records).await;
        Ok(DatasetSummary {
            version: snapshot.version,
            source: snapshot.source,
            records: snapshot.records.len(),
            products: snapshot.aggregates.len(),
        })
    }

    /// Replace the dataset with an imported export checked against a
    /// minimum-stock sheet, returning the low-stock report
    pub async fn import_with_minimums(
        &self,
        records: Vec<InventoryRecord>,
        sheet: &[MinimumStockRow],
    ) -> AppResult<(u64, LowStockReport)> {
        let (records, report) = low_stock_report(records, sheet, self.store.grouping());
        validate_records(&records).map_err(|message| AppError::ValidationError(message.to_string()))?;
        let snapshot = self.store.replace(DatasetSource::Upload, records).await;
        Ok((snapshot.version, report))
    }

    pub async fn stats(&self, now: NaiveDateTime) -> DashboardStats {
        let snapshot = self.store.snapshot().await;
        dashboard_stats_with(&snapshot.records, now, self.store.grouping())
    }

    pub async fn categories(&self) -> Vec<CategoryShare> {
        let snapshot = self.store.snapshot().await;
        category_distribution(&snapshot.records)
    }

    /// Product aggregates from the cached snapshot, filtered and sorted
    pub async fn products(&self, query: &ProductQuery) -> Vec<ProductAggregate> {
        let snapshot = self.store.snapshot().await;
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_lowercase();

        let mut products: Vec<ProductAggregate> = snapshot
            .aggregates
            .iter()
            .filter(|product| needle.is_empty() || product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_aggregates(&mut products, query.sort, query.direction);
        if let Some(limit) = query.limit {
            products.truncate(limit);
        }
        products
    }

    pub async fn product(&self, name: &str) -> AppResult<ProductDetail> {
        let snapshot = self.store.snapshot().await;
        product_detail_with(&snapshot.records, name, self.store.grouping())
            .ok_or_else(|| AppError::NotFound(format!("Product '{}'", name)))
    }

    /// Expiry classification of every batch, or only the batches expiring
    /// within `within_days` when given
    pub async fn expiry(&self, now: NaiveDateTime, within_days: Option<i64>) -> AppResult<ExpiryOverview> {
        if matches!(within_days, Some(days) if days < 0) {
            return Err(AppError::validation("withinDays", "withinDays must not be negative"));
        }

        let snapshot = self.store.snapshot().await;
        let report = expiry_report(&snapshot.records, now);
        let batches = match within_days {
            Some(days) => expiring_within(&snapshot.records, now, days),
            None => report.batches,
        };

        Ok(ExpiryOverview {
            as_of: now,
            counts: report.counts,
            batches,
        })
    }

    pub async fn reorder_plan(&self) -> Vec<ReorderPlanItem> {
        let snapshot = self.store.snapshot().await;
        plan_reorders(&snapshot.aggregates)
    }
}
