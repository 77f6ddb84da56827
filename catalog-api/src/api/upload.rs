//! Audio upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use futures::TryStreamExt;
use serde::Serialize;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::services::upload_namer::sanitize_filename;
use crate::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub audio_preview_url: String,
}

/// POST /upload-audio/
///
/// Streams the `file` part to disk and returns its public URL. Other parts
/// are ignored. A body that breaks off mid-part is a 400; only failures
/// writing the file are reported as 500.
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(sanitize_filename)
            .ok_or_else(|| {
                ApiError::Validation(vec![FieldError::new(
                    &["body", FILE_FIELD],
                    "Expected UploadFile, received a part without a filename",
                    "value_error",
                )])
            })?;

        let chunks = field.map_err(|e| ApiError::BadRequest(e.body_text()));
        let stored = state.uploads.store(&filename, chunks).await?;

        return Ok(Json(UploadResponse {
            audio_preview_url: stored.url,
        }));
    }

    Err(ApiError::Validation(vec![FieldError::missing(&[
        "body", FILE_FIELD,
    ])]))
}
