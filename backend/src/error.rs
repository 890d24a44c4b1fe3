//! Error handling for the Pharmaceutical Inventory Dashboard
//!
//! Every error leaving a handler is rendered as a JSON body with a stable code

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::csv_import::CsvImportError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Upload errors
    #[error("Missing upload: {0}")]
    MissingUpload(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("CSV import error: {0}")]
    CsvImport(#[from] CsvImportError),

    // Alert relay errors
    #[error("Stock alert failed: {message}")]
    AlertFailed { message: String, output: String },

    #[error("Stock alert timed out after {0}s")]
    AlertTimeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            output: None,
        }
    }
}

impl AppError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by_key(|(field, _)| **field);

        match fields.first().and_then(|(field, errs)| errs.first().map(|err| (**field, err))) {
            Some((field, err)) => AppError::Validation {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field)),
            },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::MissingUpload(field) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("MISSING_UPLOAD", "Both files are required")
                },
            ),
            AppError::InvalidUpload(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_UPLOAD", msg.clone()),
            ),
            AppError::Multipart(err) => (
                err.status(),
                ErrorDetail::new("INVALID_UPLOAD", err.body_text()),
            ),
            AppError::CsvImport(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("CSV_IMPORT_ERROR", err.to_string()),
            ),
            AppError::AlertFailed { message, output } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    output: Some(output.clone()),
                    ..ErrorDetail::new("ALERT_FAILED", message.clone())
                },
            ),
            AppError::AlertTimeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorDetail::new(
                    "ALERT_TIMEOUT",
                    format!("Stock alert did not finish within {} seconds", secs),
                ),
            ),
            AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("IO_ERROR", "A file system error occurred"),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
