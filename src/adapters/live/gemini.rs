//! Live adapter for the Gemini text-generation API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::StoryError;
use crate::ports::story_generator::{StoryFuture, StoryGenerator, StoryRequest};
use crate::prompt::build_system_prompt;
use crate::story::parse_story;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini story generator that calls the Google AI API.
pub struct GeminiStoryGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiStoryGenerator {
    /// Create a new Gemini generator with the given API key and model.
    #[must_use]
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self { client, api_key, model }
    }
}

impl StoryGenerator for GeminiStoryGenerator {
    fn generate(&self, request: &StoryRequest) -> StoryFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
            let system_prompt = build_system_prompt(&request);
            debug!(model = %self.model, age = %request.age, "requesting story generation");

            let body = serde_json::json!({
                "contents": [{
                    "parts": [{"text": system_prompt}]
                }]
            });

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(StoryError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                StoryError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let text = parsed
                .candidates
                .into_iter()
                .next()
                .map(|c| {
                    c.content
                        .parts
                        .into_iter()
                        .filter_map(|p| p.text)
                        .collect::<Vec<_>>()
                        .join("")
                })
                .unwrap_or_default();

            if text.is_empty() {
                return Err(StoryError::Generation("model returned no text".to_string()));
            }

            match parse_story(&text) {
                Ok(story) => Ok(story),
                Err(e) => {
                    // Raw payload is logged for diagnosis, never shown to the user.
                    error!(error = %e, raw = %text, "story response failed validation");
                    Err(e)
                }
            }
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
