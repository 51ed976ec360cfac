//! Configuration management for the Warehouse Inventory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WMS_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    AisleSet, ReportSettings, BIN_DEFAULT_MAX_CARTONS, MERGE_THRESHOLD_PERCENT,
    OPTIMIZER_DEFAULT_MAX_CARTONS, RECOGNIZED_AISLES,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Allowed browser origins
    pub cors: CorsConfig,

    /// Report tunables
    pub warehouse: WarehouseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Largest accepted request body (CSV uploads)
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConfig {
    /// Aisle letters included in the bin and optimizer views
    pub allowed_aisles: Vec<String>,

    /// Optimizer capacity when no override applies
    pub optimizer_default_max_cartons: i32,

    /// Bin status capacity when the location has no manual override
    pub bin_default_max_cartons: i32,

    /// Optimizer rows below this occupancy need a merge
    pub merge_threshold_percent: i64,
}

impl WarehouseConfig {
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            aisles: AisleSet::from_strings(&self.allowed_aisles),
            optimizer_default_max_cartons: self.optimizer_default_max_cartons,
            bin_default_max_cartons: self.bin_default_max_cartons,
            merge_threshold_percent: Decimal::from(self.merge_threshold_percent),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let warehouse = WarehouseConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.max_upload_bytes", 20 * 1024 * 1024)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("warehouse.allowed_aisles", warehouse.allowed_aisles)?
            .set_default(
                "warehouse.optimizer_default_max_cartons",
                i64::from(warehouse.optimizer_default_max_cartons),
            )?
            .set_default(
                "warehouse.bin_default_max_cartons",
                i64::from(warehouse.bin_default_max_cartons),
            )?
            .set_default(
                "warehouse.merge_threshold_percent",
                warehouse.merge_threshold_percent,
            )?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WMS_ prefix)
            .add_source(
                Environment::with_prefix("WMS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("warehouse.allowed_aisles")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            allowed_aisles: RECOGNIZED_AISLES.iter().map(char::to_string).collect(),
            optimizer_default_max_cartons: OPTIMIZER_DEFAULT_MAX_CARTONS,
            bin_default_max_cartons: BIN_DEFAULT_MAX_CARTONS,
            merge_threshold_percent: MERGE_THRESHOLD_PERCENT,
        }
    }
}
