//! HTTP handlers for inventory query endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CategoryShare, DashboardStats, InventoryRecord, ProductAggregate, ProductDetail, ReorderPlanItem};

use crate::error::AppResult;
use crate::services::inventory::{resolve_now, DatasetSummary, ExpiryOverview, ProductQuery, RecordQuery};
use crate::services::InventoryService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryQuery {
    pub as_of: Option<NaiveDate>,
    pub within_days: Option<i64>,
}

/// List records, optionally filtered and sorted by one column
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Json<Vec<InventoryRecord>> {
    let service = InventoryService::new(state.store);
    Json(service.list_records(&query).await)
}

/// Replace the whole dataset
pub async fn replace_records(
    State(state): State<AppState>,
    Json(records): Json<Vec<InventoryRecord>>,
) -> AppResult<Json<DatasetSummary>> {
    let service = InventoryService::new(state.store);
    let summary = service.replace_records(records).await?;
    Ok(Json(summary))
}

/// Dashboard headline numbers
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Json<DashboardStats> {
    let service = InventoryService::new(state.store);
    Json(service.stats(resolve_now(query.as_of)).await)
}

/// Batch count and value per product category
pub async fn get_categories(State(state): State<AppState>) -> Json<Vec<CategoryShare>> {
    let service = InventoryService::new(state.store);
    Json(service.categories().await)
}

/// Product aggregates for the stock level table
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<ProductAggregate>> {
    let service = InventoryService::new(state.store);
    Json(service.products(&query).await)
}

/// Every batch of one product
pub async fn get_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let service = InventoryService::new(state.store);
    let detail = service.product(&name).await?;
    Ok(Json(detail))
}

/// Expiry classification of the dataset
pub async fn get_expiry(
    State(state): State<AppState>,
    Query(query): Query<ExpiryQuery>,
) -> AppResult<Json<ExpiryOverview>> {
    let service = InventoryService::new(state.store);
    let overview = service
        .expiry(resolve_now(query.as_of), query.within_days)
        .await?;
    Ok(Json(overview))
}

/// Products below their minimum stock with suggested order quantities
pub async fn get_reorder_plan(State(state): State<AppState>) -> Json<Vec<ReorderPlanItem>> {
    let service = InventoryService::new(state.store);
    Json(service.reorder_plan().await)
}
