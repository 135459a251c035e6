use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bcslens_core::AppError;
use bcslens_media::{content_type_for_extension, retrieve_pipeline};
use futures::StreamExt;

use crate::auth::models::PrincipalContext;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Retrieve a stored photo by its generated identifier.
///
/// The pipeline guarantees path safety; this handler adds the owner check:
/// when the upload was recorded by this process, only the owning principal
/// may read it back. Assets without a recorded owner (uploaded before the
/// last restart) are served to any role-gated principal — identifiers carry
/// 128 bits of entropy and are not enumerable.
#[tracing::instrument(
    skip(state),
    fields(
        principal_id = %principal.principal_id,
        operation = "download_photo"
    )
)]
pub async fn download_photo(
    State(state): State<Arc<AppState>>,
    principal: PrincipalContext,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let (name, stream) = retrieve_pipeline(&filename, state.storage.clone()).await?;

    if let Some(owner_id) = state.assets.owner_of(name.as_str()).await {
        if owner_id != principal.principal_id {
            tracing::warn!(
                filename = %name,
                owner_id = %owner_id,
                "Principal is not the owner of the requested photo"
            );
            return Err(AppError::Forbidden("Unauthorized".to_string()).into());
        }
    }

    let content_type = content_type_for_extension(name.extension())
        .ok_or_else(|| AppError::InvalidName("Invalid filename format".to_string()))?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", name),
        )
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
