//! Abstracts Core Library
//!
//! This crate provides the domain models, error types, configuration and form
//! validation shared by every component of the abstract submission portal.

pub mod code;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use code::{CodeFormat, SubmissionCode};
pub use config::{Config, PortalConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::AreaCatalog;
pub use storage_types::StorageBackend;
pub use validation::{format_cpf, Field, FieldErrors};
