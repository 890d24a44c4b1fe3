//! Storage for uploaded CSV files

use std::path::{Path, PathBuf};

use serde::Serialize;
use shared::validate_upload_name;

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};

/// Upload service writing files into a single flat directory
#[derive(Clone)]
pub struct UploadService {
    root: PathBuf,
}

/// A file written to the upload directory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    pub file_name: String,
    pub size: usize,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.directory),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Path of a stored file. Names with directory components are rejected.
    pub fn resolve(&self, field: &str, name: &str) -> AppResult<PathBuf> {
        let name = name.trim();
        validate_upload_name(name).map_err(|message| AppError::validation(field, message))?;
        Ok(self.root.join(name))
    }

    /// Write a file under its own name, replacing any earlier upload
    pub async fn save(&self, field: &str, name: &str, contents: &[u8]) -> AppResult<StoredUpload> {
        let path = self.resolve(field, name)?;
        self.write(&path, contents).await
    }

    /// Write to a path obtained from [`UploadService::resolve`]
    pub async fn write(&self, path: &Path, contents: &[u8]) -> AppResult<StoredUpload> {
        self.ensure_dir().await?;
        tokio::fs::write(path, contents).await?;

        tracing::info!(file = %path.display(), bytes = contents.len(), "Stored upload");

        Ok(StoredUpload {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: contents.len(),
        })
    }
}
