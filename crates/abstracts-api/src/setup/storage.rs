//! Storage setup and initialization

use abstracts_core::Config;
use abstracts_storage::{create_storage, Storage};
use anyhow::{Context, Result};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = ?storage.backend_type(),
        bucket = config.abstract_bucket(),
        "Storage initialized successfully"
    );
    Ok(storage)
}
