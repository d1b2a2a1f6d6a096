//! # Keystone Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`planning`]: Pacing heuristics (days per week, overload threshold)
//! - [`database`]: PostgreSQL connection settings
//! - [`logging`]: Log level and file output
//!
//! # Example
//!
//! ```ignore
//! use keystone_config::{DatabaseConfig, LoggingConfig, PlanningConfig};
//!
//! let planning = PlanningConfig::from_env();
//! let database = DatabaseConfig::from_env();
//! let logging = LoggingConfig::from_env();
//! ```

pub mod database;
pub mod logging;
pub mod planning;

// Re-export commonly used types at crate root
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
pub use planning::PlanningConfig;
