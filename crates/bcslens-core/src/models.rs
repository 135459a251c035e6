//! Domain models for the photo ingestion pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted body-condition photo.
///
/// The identifier is the complete on-disk filename (`{32 hex}.{ext}`) and the
/// sole index into storage; the path it resolves to is always derived from the
/// storage root, never taken from client input. The owner id is carried so the
/// route layer can enforce owner-only retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAsset {
    /// Generated storage identifier, e.g. `3f2a...9c.jpg`
    pub filename: String,
    /// Size of the stored bytes
    pub size_bytes: u64,
    /// MIME type detected from content (not the client's declaration)
    pub content_type: String,
    /// Principal that uploaded the photo
    pub owner_id: Uuid,
    /// When the photo was persisted
    pub created_at: DateTime<Utc>,
}

/// Response body for a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// The generated identifier; never the client-supplied filename.
    pub filename: String,
}

impl UploadResponse {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            message: "File uploaded!".to_string(),
            filename: filename.into(),
        }
    }
}
