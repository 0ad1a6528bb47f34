//! The story-generation endpoint.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::StoryError;
use crate::pipeline::{self, StoryJob};
use crate::ports::story_generator::StoryRequest;
use crate::server::AppState;

/// Inbound body for `POST /api/generate-story`. Required fields are
/// optional here so that missing ones can be reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryBody {
    prompt: Option<String>,
    age_group: Option<String>,
    /// Reserved: accepted and validated, not yet consumed by generation.
    chinese_level: Option<String>,
    #[serde(default)]
    include_images: Option<bool>,
    subject_reference: Option<String>,
    story_id: Option<String>,
    child_name: Option<String>,
    companion: Option<String>,
    cultural_tag: Option<String>,
    memory: Option<String>,
}

/// `POST /api/generate-story`
pub async fn generate_story(
    State(state): State<AppState>,
    Json(body): Json<GenerateStoryBody>,
) -> Result<Json<Value>, StoryError> {
    let mut missing = Vec::new();
    if body.prompt.as_deref().unwrap_or("").is_empty() {
        missing.push("prompt");
    }
    if body.age_group.as_deref().unwrap_or("").is_empty() {
        missing.push("ageGroup");
    }
    if body.chinese_level.as_deref().unwrap_or("").is_empty() {
        missing.push("chineseLevel");
    }
    if !missing.is_empty() {
        return Err(StoryError::Validation(format!(
            "Missing required fields: {} are required",
            missing.join(", ")
        )));
    }

    let include_images = body.include_images.unwrap_or(false);
    if include_images {
        if let Some(ref reference) = body.subject_reference {
            validate_reference_url(reference)?;
        }
    }

    let story_request = StoryRequest {
        prompt: body.prompt.unwrap_or_default(),
        age: body.age_group.unwrap_or_default(),
        child_name: body.child_name,
        companion: body.companion,
        cultural_tag: body.cultural_tag,
        memory: body.memory,
    };
    let job = StoryJob {
        story: story_request,
        chinese_level: body.chinese_level.unwrap_or_default(),
        include_images,
        subject_reference: body.subject_reference,
        story_id: body.story_id,
        aspect_ratio: state.defaults.aspect_ratio.clone(),
    };

    let story = pipeline::generate_story(&state.ctx, &job).await?;
    Ok(Json(json!({ "story": story })))
}

/// `GET /api/generate-story` — static endpoint descriptor.
pub async fn describe() -> Json<Value> {
    Json(json!({
        "message": "Story generation API is running",
        "endpoint": "POST /api/generate-story",
        "requiredFields": ["prompt", "ageGroup", "chineseLevel"],
        "optionalFields": [
            "includeImages", "subjectReference", "storyId",
            "childName", "companion", "culturalTag", "memory"
        ]
    }))
}

/// The subject reference must be an absolute HTTP(S) URL.
fn validate_reference_url(reference: &str) -> Result<(), StoryError> {
    let valid = Url::parse(reference)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(StoryError::Validation(
            "Invalid image URL provided. Please provide a valid HTTP/HTTPS URL.".to_string(),
        ))
    }
}
