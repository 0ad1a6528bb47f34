//! Bilingual story data model and post-parse validation.
//!
//! A [`BilingualStory`] is assembled once per request and handed to the
//! client as an immutable value; only a part's `image` field is set, exactly
//! once, during the illustration stage.

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// The fixed number of parts every story must have. This is a contract with
/// the text-generation prompt, not derived from input.
pub const STORY_PART_COUNT: usize = 5;

/// One page/scene of the story.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPart {
    /// Narrative text in English.
    pub english: String,
    /// Narrative text in Chinese. Must contain zero Latin characters.
    pub chinese: String,
    /// Descriptive prompt used to drive image generation for this scene.
    pub image_prompt: String,
    /// URL of the generated illustration; absent until the image stage
    /// succeeds for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The story title in both languages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryTitle {
    /// Title in English.
    pub english: String,
    /// Title in Chinese. Must contain zero Latin characters.
    pub chinese: String,
}

/// The generated story aggregate: a title and exactly five parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilingualStory {
    /// The bilingual title.
    pub title: StoryTitle,
    /// The ordered story parts.
    pub parts: Vec<StoryPart>,
}

impl BilingualStory {
    /// Validate the structure and content of a freshly parsed story.
    ///
    /// Checks run in order, each a distinct failure mode: title fields
    /// present, exactly [`STORY_PART_COUNT`] parts, every part's text
    /// fields non-empty, and no Latin letter anywhere in the Chinese text.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::Generation`] on the first violation; the whole
    /// story is rejected, never partially accepted.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.title.english.trim().is_empty() || self.title.chinese.trim().is_empty() {
            return Err(StoryError::Generation(
                "story is missing an English or Chinese title".to_string(),
            ));
        }

        if self.parts.len() != STORY_PART_COUNT {
            return Err(StoryError::Generation(format!(
                "story must have exactly {STORY_PART_COUNT} parts, got {}",
                self.parts.len()
            )));
        }

        for (i, part) in self.parts.iter().enumerate() {
            if part.english.trim().is_empty()
                || part.chinese.trim().is_empty()
                || part.image_prompt.trim().is_empty()
            {
                return Err(StoryError::Generation(format!(
                    "part {} is missing required fields",
                    i + 1
                )));
            }
        }

        if contains_latin(&self.title.chinese) {
            return Err(StoryError::Generation(
                "Chinese title contains English characters".to_string(),
            ));
        }
        for (i, part) in self.parts.iter().enumerate() {
            if contains_latin(&part.chinese) {
                return Err(StoryError::Generation(format!(
                    "Chinese text of part {} contains English characters",
                    i + 1
                )));
            }
        }

        Ok(())
    }
}

/// Result of one image-generation call. Ephemeral, never persisted beyond
/// the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// URL of the generated image.
    pub url: String,
}

/// Scan for Latin alphabetic characters (`[a-zA-Z]`).
#[must_use]
pub fn contains_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Strip a markdown code-fence wrapper the model may have added around its
/// JSON payload.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a raw model response into a validated [`BilingualStory`].
///
/// # Errors
///
/// Returns [`StoryError::Generation`] if the payload is not valid JSON or
/// fails structural/content validation. Callers log the raw response for
/// diagnosis; it is never shown to the end user.
pub fn parse_story(raw: &str) -> Result<BilingualStory, StoryError> {
    let payload = strip_code_fence(raw);
    let story: BilingualStory = serde_json::from_str(payload)
        .map_err(|e| StoryError::Generation(format!("malformed story: {e}")))?;
    story.validate()?;
    Ok(story)
}
