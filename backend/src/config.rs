//! Configuration management for the Pharmaceutical Inventory Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PIM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::GroupingKey;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Uploaded CSV storage
    pub uploads: UploadConfig,

    /// External stock-alert mailer
    pub alert: AlertConfig,

    /// Inventory snapshot behavior
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    pub directory: String,

    /// Largest accepted request body for uploads, in bytes
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Program that delivers the stock alert email
    pub program: String,

    /// Arguments passed before the recipient and file arguments
    pub args: Vec<String>,

    /// Seconds before the mailer is killed
    pub timeout_secs: u64,

    /// Text the mailer prints on stdout when delivery succeeded
    pub success_marker: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// How base product names are compared when grouping batches
    pub grouping: GroupingKey,

    /// Serve the built-in dataset until an export is processed
    pub seed_on_start: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PIM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("uploads.directory", "./uploads")?
            .set_default("uploads.max_bytes", 10 * 1024 * 1024)?
            .set_default("alert.program", "python3")?
            .set_default("alert.args", vec!["./stock_alert.py"])?
            .set_default("alert.timeout_secs", 120)?
            .set_default("alert.success_marker", DEFAULT_SUCCESS_MARKER)?
            .set_default("inventory.grouping", "exact")?
            .set_default("inventory.seed_on_start", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PIM_ prefix)
            .add_source(
                Environment::with_prefix("PIM")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("alert.args")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Line printed by the mailer after a successful send
pub const DEFAULT_SUCCESS_MARKER: &str = "Stock alert email sent successfully";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: "./uploads".to_string(),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["./stock_alert.py".to_string()],
            timeout_secs: 120,
            success_marker: DEFAULT_SUCCESS_MARKER.to_string(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingKey::Exact,
            seed_on_start: true,
        }
    }
}
