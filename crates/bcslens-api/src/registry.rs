//! In-process asset index for retrieval authorization.
//!
//! The on-disk layout is a flat directory with no sidecar metadata, so the
//! owner recorded at upload time is tracked here, keyed by identifier. The
//! route layer uses it to enforce owner-only retrieval; the pipelines never
//! consult it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use bcslens_core::models::StoredAsset;

#[derive(Clone, Default)]
pub struct AssetIndex {
    inner: Arc<RwLock<HashMap<String, StoredAsset>>>,
}

impl AssetIndex {
    /// Record an asset after a successful upload.
    pub async fn insert(&self, asset: StoredAsset) {
        self.inner
            .write()
            .await
            .insert(asset.filename.clone(), asset);
    }

    /// Owner of an identifier, if this process recorded its upload.
    pub async fn owner_of(&self, filename: &str) -> Option<Uuid> {
        self.inner.read().await.get(filename).map(|a| a.owner_id)
    }

    pub async fn get(&self, filename: &str) -> Option<StoredAsset> {
        self.inner.read().await.get(filename).cloned()
    }
}
