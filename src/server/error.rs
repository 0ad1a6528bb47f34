//! HTTP mapping for [`StoryError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::StoryError;

impl IntoResponse for StoryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Caller input problems: field-specific 400s.
            StoryError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Missing credential: classified, never generic.
            StoryError::MissingApiKey { .. } => {
                tracing::error!(error = %self, "credential missing");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            // Upstream produced an invalid story or a failed image batch.
            StoryError::Generation(_) | StoryError::ImageGeneration(_) => {
                tracing::error!(error = %self, "generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            StoryError::Upload(detail) => {
                tracing::error!(error = %self, "upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to upload image: {detail}"),
                )
            }

            // Transport and configuration failures: log detail, surface
            // the underlying message.
            StoryError::Api { .. }
            | StoryError::Network(_)
            | StoryError::Io(_)
            | StoryError::Config(_) => {
                tracing::error!(error = %self, "upstream error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = StoryError::Validation("prompt is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_key_maps_to_500() {
        let response = StoryError::missing_key("Gemini", "GOOGLE_API_KEY").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generation_maps_to_500() {
        let response = StoryError::Generation("malformed story".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
