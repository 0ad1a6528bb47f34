//! The reference-photo upload endpoint.

use axum::extract::{Multipart, State};
use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::error::StoryError;
use crate::ports::media_store::UploadRequest;
use crate::server::AppState;

/// `POST /api/upload-image` — multipart upload of one reference photo.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, StoryError> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StoryError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| StoryError::Validation(format!("Failed to read file field: {e}")))?;
            file = Some((data.to_vec(), mime_type));
        }
    }

    let Some((data, mime_type)) = file else {
        return Err(StoryError::Validation("No file provided".to_string()));
    };

    if !mime_type.starts_with("image/") {
        return Err(StoryError::Validation("Only image uploads are supported".to_string()));
    }

    // The MIME type is caller-supplied; check the magic bytes too.
    if image::guess_format(&data).is_err() {
        return Err(StoryError::Validation(
            "Uploaded file is not a recognizable image".to_string(),
        ));
    }

    let store = state.ctx.media()?;
    let stored = store.upload(&UploadRequest { data, mime_type }).await?;
    info!(url = %stored.url, "reference image uploaded");

    Ok(Json(json!({ "url": stored.url, "message": "Image uploaded successfully" })))
}
