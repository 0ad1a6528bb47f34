//! Story generator port for the text-generation API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;
use crate::story::BilingualStory;

/// A request to generate a bilingual story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Free-text theme for the story.
    pub prompt: String,
    /// Reader age value, e.g. `"6"` or `"3-5"`.
    pub age: String,
    /// Name of the main character, when personalizing.
    #[serde(default)]
    pub child_name: Option<String>,
    /// Companion character, when personalizing.
    #[serde(default)]
    pub companion: Option<String>,
    /// Cultural tradition to weave into the story.
    #[serde(default)]
    pub cultural_tag: Option<String>,
    /// A family memory to fold into the narrative.
    #[serde(default)]
    pub memory: Option<String>,
}

impl StoryRequest {
    /// Build a request from just a theme and age.
    #[must_use]
    pub fn new(prompt: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            age: age.into(),
            child_name: None,
            companion: None,
            cultural_tag: None,
            memory: None,
        }
    }
}

/// Boxed future type returned by [`StoryGenerator::generate`].
pub type StoryFuture<'a> =
    Pin<Box<dyn Future<Output = Result<BilingualStory, StoryError>> + Send + 'a>>;

/// Generates validated bilingual stories via an external text model.
pub trait StoryGenerator: Send + Sync {
    /// Generate one story for the given request. Implementations must
    /// return a story that already passed
    /// [`BilingualStory::validate`](crate::story::BilingualStory::validate).
    fn generate(&self, request: &StoryRequest) -> StoryFuture<'_>;
}

impl std::fmt::Debug for dyn StoryGenerator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn StoryGenerator")
    }
}
