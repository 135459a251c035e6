//! Storage gateway bootstrap.

use anyhow::{Context, Result};
use bcslens_core::Config;
use bcslens_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Construct the storage gateway, creating the upload root if it does not
/// exist. Invoked once during service bootstrap rather than as a module-load
/// side effect.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.storage_root())
        .await
        .with_context(|| {
            format!(
                "Failed to initialize storage root {}",
                config.storage_root().display()
            )
        })?;

    tracing::info!(
        storage_root = %config.storage_root().display(),
        "Storage gateway initialized"
    );

    Ok(Arc::new(storage))
}
