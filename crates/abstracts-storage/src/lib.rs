//! Abstracts Storage Library
//!
//! Blob storage for uploaded abstracts: the [`Storage`] trait plus S3 and local
//! filesystem backends.
//!
//! # Storage key format
//!
//! Abstracts are stored as `{bucket}/{cpf}_{unix_millis}.pdf`, for example
//! `resumos/12345678900_1718035200000.pdf`. Keys must not contain `..` or a
//! leading `/`. Uploads never overwrite: an existing key is reported as
//! [`StorageError::AlreadyExists`].

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use abstracts_core::StorageBackend;
pub use factory::create_storage;
pub use keys::abstract_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
