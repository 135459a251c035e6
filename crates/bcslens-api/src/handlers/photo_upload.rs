use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bcslens_core::models::UploadResponse;
use bcslens_media::{upload_pipeline, UploadRequest};

use crate::auth::models::PrincipalContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

/// Upload a body-condition photo.
///
/// The buffer stays in memory while policy and content checks run; nothing is
/// written to disk unless every check passes. The response carries the
/// generated identifier — never the client's filename.
#[tracing::instrument(
    skip(state, multipart),
    fields(
        principal_id = %principal.principal_id,
        role = %principal.role,
        operation = "upload_photo"
    )
)]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    principal: PrincipalContext,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (data, original_filename, declared_content_type) =
        extract_multipart_file(multipart).await?;

    let request = UploadRequest {
        owner_id: principal.principal_id,
        data,
        declared_content_type,
        original_filename,
    };

    let asset = upload_pipeline(request, &state.policy, state.storage.clone()).await?;

    state.assets.insert(asset.clone()).await;

    Ok(Json(UploadResponse::new(asset.filename)))
}
