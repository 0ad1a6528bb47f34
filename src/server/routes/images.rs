//! The standalone image-generation endpoint.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::StoryError;
use crate::pipeline;
use crate::server::AppState;
use crate::story::StoryPart;

/// Inbound body for `POST /api/generate-images`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesBody {
    story_parts: Option<Vec<PartBody>>,
    subject_reference: Option<String>,
    story_id: Option<String>,
}

/// One inbound story part. Only the image prompt matters here; the text
/// fields are passed through untouched when present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    #[serde(default)]
    english: String,
    #[serde(default)]
    chinese: String,
    image_prompt: Option<String>,
}

/// `POST /api/generate-images`
pub async fn generate_images(
    State(state): State<AppState>,
    Json(body): Json<GenerateImagesBody>,
) -> Result<Json<Value>, StoryError> {
    let parts = body.story_parts.unwrap_or_default();
    if parts.is_empty() {
        return Err(StoryError::Validation(
            "storyParts array is required and must not be empty".to_string(),
        ));
    }

    let Some(subject_reference) = body.subject_reference.filter(|s| !s.is_empty()) else {
        return Err(StoryError::Validation(
            "subjectReference (uploaded photo) is required".to_string(),
        ));
    };

    let mut story_parts = Vec::with_capacity(parts.len());
    for (i, part) in parts.into_iter().enumerate() {
        let Some(image_prompt) = part.image_prompt.filter(|p| !p.is_empty()) else {
            return Err(StoryError::Validation(format!(
                "Story part {} is missing imagePrompt",
                i + 1
            )));
        };
        story_parts.push(StoryPart {
            english: part.english,
            chinese: part.chinese,
            image_prompt,
            image: None,
        });
    }

    let story_id = body.story_id.unwrap_or_else(|| "unknown".to_string());
    let generator = state.ctx.images()?;
    let images = pipeline::illustrate_parts(
        generator,
        &story_parts,
        &subject_reference,
        &state.defaults.aspect_ratio,
        &story_id,
    )
    .await?;

    let message = format!("Successfully generated {} images", images.len());
    Ok(Json(json!({ "images": images, "message": message })))
}

/// `GET /api/generate-images` — static endpoint descriptor.
pub async fn describe() -> Json<Value> {
    Json(json!({
        "message": "Image generation API is running",
        "endpoint": "POST /api/generate-images",
        "requiredFields": ["storyParts", "subjectReference"],
        "optionalFields": ["storyId"]
    }))
}
