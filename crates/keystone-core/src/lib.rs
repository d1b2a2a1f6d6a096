//! # Keystone Core
//!
//! Core types shared by every Keystone crate.
//!
//! - [`errors`]: Application error type, its [`ErrorKind`] taxonomy and HTTP mapping
//! - [`validation`]: `validator` integration for request DTOs
//!
//! # Example
//!
//! ```ignore
//! use keystone_core::{AppError, ErrorKind};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! assert_eq!(error.kind, ErrorKind::NotFound);
//! ```

pub mod errors;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use validation::validate_dto;
