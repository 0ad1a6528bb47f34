//! Liveness endpoint reporting which providers are configured.

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::server::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "storybloom",
        "timestamp": chrono::Utc::now(),
        "providers": {
            "gemini": state.ctx.story_generator.is_some(),
            "replicate": state.ctx.image_generator.is_some(),
            "cloudinary": state.ctx.media_store.is_some(),
        }
    }))
}
