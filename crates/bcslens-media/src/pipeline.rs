//! Upload and retrieval pipelines.
//!
//! Upload: receive -> policy -> sniff & cross-check -> generate name ->
//! persist -> respond. The buffer stays in memory until content verification
//! has passed, so every rejection path leaves the filesystem untouched.
//!
//! Retrieval: validate name format -> resolve via the gateway (which performs
//! its own containment check) -> stream bytes.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use bcslens_core::models::StoredAsset;
use bcslens_storage::{ByteStream, Storage, StorageError};

use crate::error::MediaError;
use crate::naming::{generate_identifier, SafeName};
use crate::policy::UploadPolicy;
use crate::sniffer::ValidationVerdict;

/// One upload attempt. Transient: built from the request body, dropped when
/// the pipeline returns.
#[derive(Debug)]
pub struct UploadRequest {
    pub owner_id: Uuid,
    pub data: Vec<u8>,
    pub declared_content_type: String,
    pub original_filename: String,
}

/// Pipeline failures, split between client-side validation rejections and
/// storage faults so the HTTP layer can map them to 4xx vs 5xx.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Run the upload pipeline for a single in-memory buffer.
///
/// Exactly one file is created on success; zero files are created on any
/// rejection path. The returned asset carries the generated identifier and
/// the owning principal for the route layer's retrieval check — never the
/// client's original filename.
pub async fn upload_pipeline(
    request: UploadRequest,
    policy: &UploadPolicy,
    storage: Arc<dyn Storage>,
) -> Result<StoredAsset, PipelineError> {
    let declared_ext = request
        .original_filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    policy.check(request.data.len(), &request.declared_content_type, &declared_ext)?;

    let verdict =
        ValidationVerdict::cross_check(&request.data, &request.declared_content_type, policy);
    if !verdict.matched {
        tracing::warn!(
            declared = %verdict.declared_mime,
            detected = ?verdict.detected_mime,
            size_bytes = request.data.len(),
            "Upload content verification failed"
        );
        return Err(verdict.into_rejection().into());
    }
    let detected_mime = verdict
        .detected_mime
        .clone()
        .ok_or(MediaError::UndeterminedContent)?;

    let identifier = generate_identifier(&declared_ext, policy.allowed_extensions())?;
    let size_bytes = request.data.len() as u64;

    storage.write(identifier.as_str(), request.data).await?;

    tracing::info!(
        filename = %identifier,
        owner_id = %request.owner_id,
        content_type = %detected_mime,
        size_bytes,
        "Photo persisted"
    );

    Ok(StoredAsset {
        filename: identifier.into_string(),
        size_bytes,
        content_type: detected_mime,
        owner_id: request.owner_id,
        created_at: Utc::now(),
    })
}

/// Run the retrieval pipeline for a client-requested filename.
///
/// The pipeline is identity-agnostic: it guarantees path safety only, and the
/// calling route compares the asset's owner against the authenticated
/// principal. Malicious patterns and format errors are rejected with distinct
/// reasons; a containment breach surfaces as `StorageError::PathViolation`
/// even though the name guard should make it impossible.
pub async fn retrieve_pipeline(
    requested_name: &str,
    storage: Arc<dyn Storage>,
) -> Result<(SafeName, ByteStream), PipelineError> {
    let name = match SafeName::parse(requested_name) {
        Ok(name) => name,
        Err(err @ MediaError::MaliciousName(_)) => {
            tracing::warn!(
                requested = %requested_name.replace('\0', "\\0"),
                "Malicious filename pattern in retrieval request"
            );
            return Err(err.into());
        }
        Err(err) => {
            tracing::debug!(requested = %requested_name, "Invalid filename format");
            return Err(err.into());
        }
    };

    let stream = storage.read_stream(name.as_str()).await?;

    Ok((name, stream))
}
