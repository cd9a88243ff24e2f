use crate::keys::check_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/abstracts")
    /// * `base_url` - Base URL files are served from (e.g., "http://localhost:4000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to a path inside the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !check_key(key) {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.to_string()),
                _ => StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )),
            })?;

        let written = async {
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            // Partial writes must not leave a file behind.
            let _ = fs::remove_file(&path).await;
            tracing::error!(
                error = %e,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Local storage upload failed"
            );
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn storage(dir: &TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:4000/files/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_writes_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir).await;

        let key = storage
            .upload(
                "resumos/12345678900_1.pdf",
                "application/pdf",
                Bytes::from_static(b"%PDF-1.7"),
            )
            .await
            .unwrap();

        assert_eq!(key, "resumos/12345678900_1.pdf");
        assert!(storage.exists(&key).await.unwrap());
        let on_disk = std::fs::read(dir.path().join(&key)).unwrap();
        assert_eq!(on_disk, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_upload_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir).await;
        let key = "resumos/12345678900_1.pdf";

        storage
            .upload(key, "application/pdf", Bytes::from_static(b"first"))
            .await
            .unwrap();
        let second = storage
            .upload(key, "application/pdf", Bytes::from_static(b"second"))
            .await;

        assert!(matches!(second, Err(StorageError::AlreadyExists(_))));
        let on_disk = std::fs::read(dir.path().join(key)).unwrap();
        assert_eq!(on_disk, b"first");
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir).await;

        let result = storage
            .upload("../outside.pdf", "application/pdf", Bytes::from_static(b"x"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(storage.exists("/etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_public_url_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir).await;

        assert_eq!(
            storage.public_url("resumos/a.pdf"),
            "http://localhost:4000/files/resumos/a.pdf"
        );
        assert!(!storage.exists("resumos/a.pdf").await.unwrap());
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
