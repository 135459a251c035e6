//! Application state shared across handlers.

use std::sync::Arc;

use bcslens_core::Config;
use bcslens_media::UploadPolicy;
use bcslens_storage::Storage;

use crate::registry::AssetIndex;

/// Shared application state. Per-request data never lives here; the only
/// mutable member is the asset index, which is internally synchronized.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub policy: UploadPolicy,
    pub assets: AssetIndex,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let policy = UploadPolicy::new(
            config.max_upload_bytes(),
            config.allowed_extensions().to_vec(),
            config.allowed_content_types().to_vec(),
        );
        AppState {
            config,
            storage,
            policy,
            assets: AssetIndex::default(),
        }
    }
}
