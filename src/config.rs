//! Configuration management for the catalog loader

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Locations of the two line-delimited dumps
#[derive(Debug, Deserialize, Clone)]
pub struct DumpConfig {
    pub authors: PathBuf,
    pub works: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// `console`, `file` or `both`
    #[serde(default = "default_log_output")]
    pub output: String,
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Emit a progress line every N input lines (0 disables it)
    pub progress_interval: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub dumps: DumpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. CATALOG_LOADER_DATABASE__MAX_CONNECTIONS=4
            .add_source(
                Environment::with_prefix("CATALOG_LOADER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("dumps.authors", env::var("AUTHORS_DUMP").ok())?
            .set_override_option("dumps.works", env::var("WORKS_DUMP").ok())?
            .build()?;

        config.try_deserialize()
    }
}

fn default_log_output() -> String {
    "console".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_log_file_prefix() -> String {
    "catalog-loader".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            output: default_log_output(),
            directory: default_log_directory(),
            file_prefix: default_log_file_prefix(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            progress_interval: 100_000,
        }
    }
}
