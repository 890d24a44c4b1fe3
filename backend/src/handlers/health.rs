//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::DatasetSource;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub snapshot_version: u64,
    pub dataset: DatasetSource,
    pub records: usize,
}

/// Root endpoint
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.snapshot().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot_version: snapshot.version,
        dataset: snapshot.source,
        records: snapshot.records.len(),
    })
}
