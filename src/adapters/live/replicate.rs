//! Live adapter for the Replicate image-generation API.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::StoryError;
use crate::ports::image_generator::{ImageFuture, ImageGenerator, ImageRequest};
use crate::story::GeneratedImage;

const REPLICATE_API_BASE: &str = "https://api.replicate.com/v1/models";

/// Live Replicate image generator that runs one prediction per call.
pub struct ReplicateImageGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl ReplicateImageGenerator {
    /// Create a new Replicate generator for the given model
    /// (e.g. `"minimax/image-01"`).
    #[must_use]
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self { client, api_key, model }
    }
}

impl ImageGenerator for ReplicateImageGenerator {
    fn generate(&self, request: &ImageRequest) -> ImageFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{REPLICATE_API_BASE}/{}/predictions", self.model);
            debug!(model = %self.model, aspect_ratio = %request.aspect_ratio,
                "requesting image generation");

            let body = serde_json::json!({
                "input": {
                    "prompt": request.prompt,
                    "aspect_ratio": request.aspect_ratio,
                    "subject_reference": request.subject_reference,
                }
            });

            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                // Hold the connection until the prediction completes.
                .header("Prefer", "wait")
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(StoryError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: PredictionResponse =
                serde_json::from_str(&response_text).map_err(|e| StoryError::Api {
                    status: 200,
                    message: format!("Failed to parse response: {e}"),
                })?;

            if let Some(detail) = parsed.error {
                return Err(StoryError::ImageGeneration(detail));
            }

            // An empty output list is a failure, not zero-images-is-valid.
            let Some(url) = parsed.output.into_iter().flatten().next() else {
                let truncated = if response_text.len() > 500 {
                    let cut: String = response_text.chars().take(500).collect();
                    format!("{cut}...")
                } else {
                    response_text.clone()
                };
                return Err(StoryError::ImageGeneration(format!(
                    "no image in prediction output. Body: {truncated}"
                )));
            };

            Ok(GeneratedImage { url })
        })
    }
}

// --- Replicate API response types ---

#[derive(Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    output: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}
