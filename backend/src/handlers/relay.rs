//! HTTP handlers for the upload and stock alert relay used by the dashboard

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::LowStockReport;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::alert::AlertOutcome;
use crate::services::csv_import::{load_inventory_file, load_minimum_stock_file};
use crate::services::{AlertService, InventoryService, UploadService};
use crate::AppState;

pub const INVENTORY_FIELD: &str = "inventoryFile";
pub const MIN_STOCK_FIELD: &str = "minStockFile";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub inventory_file: String,
    pub min_stock_file: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInventoryRequest {
    pub inventory_file_path: String,
    pub min_stock_file_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInventoryResponse {
    pub success: bool,
    pub version: u64,
    #[serde(flatten)]
    pub report: LowStockReport,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Recipient email is required"))]
    pub recipient_email: String,
    pub inventory_file_path: Option<String>,
    pub min_stock_file_path: Option<String>,
}

struct PendingUpload {
    file_name: String,
    contents: Vec<u8>,
}

/// Accept the inventory export and minimum-stock sheet in one multipart form
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut inventory: Option<PendingUpload> = None;
    let mut min_stock: Option<PendingUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let slot = match field.name() {
            Some(INVENTORY_FIELD) => &mut inventory,
            Some(MIN_STOCK_FIELD) => &mut min_stock,
            _ => continue,
        };
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidUpload("Uploaded parts must carry a file name".to_string()))?;
        let contents = field.bytes().await?.to_vec();
        *slot = Some(PendingUpload { file_name, contents });
    }

    let inventory = inventory.ok_or_else(|| AppError::MissingUpload(INVENTORY_FIELD.to_string()))?;
    let min_stock = min_stock.ok_or_else(|| AppError::MissingUpload(MIN_STOCK_FIELD.to_string()))?;

    // Both names must pass before either file is written
    let uploads = UploadService::new(&state.config.uploads);
    let inventory_path = uploads.resolve(INVENTORY_FIELD, &inventory.file_name)?;
    let min_stock_path = uploads.resolve(MIN_STOCK_FIELD, &min_stock.file_name)?;

    let inventory = uploads.write(&inventory_path, &inventory.contents).await?;
    let min_stock = uploads.write(&min_stock_path, &min_stock.contents).await?;

    Ok(Json(UploadResponse {
        success: true,
        inventory_file: inventory.file_name,
        min_stock_file: min_stock.file_name,
    }))
}

/// Import both uploaded files, replace the dataset and report low stock
pub async fn process_inventory(
    State(state): State<AppState>,
    Json(input): Json<ProcessInventoryRequest>,
) -> AppResult<Json<ProcessInventoryResponse>> {
    let uploads = UploadService::new(&state.config.uploads);
    let inventory_path = uploads.resolve("inventoryFilePath", &input.inventory_file_path)?;
    let min_stock_path = uploads.resolve("minStockFilePath", &input.min_stock_file_path)?;

    let records = load_inventory_file(&inventory_path).await?;
    let sheet = load_minimum_stock_file(&min_stock_path).await?;
    tracing::info!(
        records = records.len(),
        sheet_rows = sheet.len(),
        "Processing uploaded inventory"
    );

    let service = InventoryService::new(state.store);
    let (version, report) = service.import_with_minimums(records, &sheet).await?;

    Ok(Json(ProcessInventoryResponse {
        success: true,
        version,
        report,
    }))
}

/// Run the stock alert mailer for a recipient
pub async fn send_email(
    State(state): State<AppState>,
    Json(input): Json<SendEmailRequest>,
) -> AppResult<Json<AlertOutcome>> {
    input.validate()?;

    let uploads = UploadService::new(&state.config.uploads);
    let inventory_path = input
        .inventory_file_path
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .map(|name| uploads.resolve("inventoryFilePath", name))
        .transpose()?;
    let min_stock_path = input
        .min_stock_file_path
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .map(|name| uploads.resolve("minStockFilePath", name))
        .transpose()?;

    let alerts = AlertService::new(state.config.alert.clone());
    let outcome = alerts
        .send(
            input.recipient_email.trim(),
            inventory_path.as_deref(),
            min_stock_path.as_deref(),
        )
        .await?;
    Ok(Json(outcome))
}
