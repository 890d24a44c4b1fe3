//! Stock alert relay
//!
//! Delivery is delegated to an external mailer program. The relay passes the
//! recipient and file locations as arguments and judges the outcome from the
//! exit status and the mailer's stdout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use shared::validate_email;
use tokio::process::Command;

use crate::config::AlertConfig;
use crate::error::{AppError, AppResult};

/// Alert service running the configured mailer
#[derive(Clone)]
pub struct AlertService {
    config: AlertConfig,
}

/// Result of a delivered alert
#[derive(Debug, Clone, Serialize)]
pub struct AlertOutcome {
    pub success: bool,
    pub message: String,
    pub output: String,
}

impl AlertService {
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    fn command(
        &self,
        recipient: &str,
        inventory_file: Option<&Path>,
        min_stock_file: Option<&Path>,
    ) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args).arg("--recipient").arg(recipient);
        if let Some(path) = inventory_file {
            command.arg("--inventory-file").arg(path);
        }
        if let Some(path) = min_stock_file {
            command.arg("--min-stock-file").arg(path);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Run the mailer once and wait for it within the configured timeout
    pub async fn send(
        &self,
        recipient: &str,
        inventory_file: Option<&Path>,
        min_stock_file: Option<&Path>,
    ) -> AppResult<AlertOutcome> {
        validate_email(recipient).map_err(|message| AppError::validation("recipientEmail", message))?;

        tracing::info!(
            program = %self.config.program,
            recipient,
            "Executing stock alert"
        );

        let mut command = self.command(recipient, inventory_file, min_stock_file);
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(result) => result.map_err(|e| AppError::AlertFailed {
                message: format!("Failed to start {}: {}", self.config.program, e),
                output: String::new(),
            })?,
            Err(_) => return Err(AppError::AlertTimeout(self.config.timeout_secs)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::debug!(output = %stdout, "Stock alert output");
        if !stderr.trim().is_empty() {
            tracing::warn!(stderr = %stderr, "Stock alert wrote to stderr");
        }

        if !output.status.success() {
            return Err(AppError::AlertFailed {
                message: format!("Stock alert exited with {}", output.status),
                output: if stderr.trim().is_empty() { stdout } else { stderr },
            });
        }

        if !stdout.contains(&self.config.success_marker) {
            return Err(AppError::AlertFailed {
                message: "Failed to send email. See output for details.".to_string(),
                output: stdout,
            });
        }

        Ok(AlertOutcome {
            success: true,
            message: "Email sent successfully!".to_string(),
            output: stdout,
        })
    }
}
