//! Mock blob store for testing

use abstracts_storage::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// In-memory storage that never overwrites, like the real backends.
#[derive(Clone, Default)]
#[allow(clippy::type_complexity)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, (String, Bytes)>>>,
    fail_uploads: Arc<AtomicBool>,
    gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
}

/// Keeps uploads blocked until released.
pub struct UploadGate(Arc<Semaphore>);

impl UploadGate {
    /// Let blocked and future uploads through.
    pub fn release(&self) {
        self.0.add_permits(1);
    }
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Block every upload until the returned gate is released.
    pub fn hold_uploads(&self) -> UploadGate {
        let semaphore = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(semaphore.clone());
        UploadGate(semaphore)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn get(&self, key: &str) -> Option<(String, Bytes)> {
        self.files.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        tokio::task::yield_now().await;

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        }

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "Mock upload failure".to_string(),
            ));
        }

        let mut files = self.files.lock().unwrap();
        if files.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        files.insert(key.to_string(), (content_type.to_string(), data));
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{}", key)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
