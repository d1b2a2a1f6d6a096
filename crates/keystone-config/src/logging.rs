//! Logging configuration.
//!
//! - `LOG_LEVEL`: Default level for Keystone targets (default: "info")
//! - `LOG_DIR`: Directory for rolling log files (default: "storage/logs")
//! - `LOG_JSON_FILE`: Write structured JSON logs to `LOG_DIR` (default: true)

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            log_dir: PathBuf::from("storage/logs"),
            json_file: true,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            json_file: env::var("LOG_JSON_FILE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.json_file),
        }
    }
}
