//! Image generator port for the illustration API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;
use crate::story::GeneratedImage;

/// A request to generate one illustration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The text prompt describing the desired scene.
    pub prompt: String,
    /// URL of the reference photo that conditions the model toward a
    /// consistent depicted character. Forwarded as-is, never processed
    /// locally.
    pub subject_reference: String,
    /// Aspect ratio (e.g., `"3:4"`).
    pub aspect_ratio: String,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type ImageFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GeneratedImage, StoryError>> + Send + 'a>>;

/// Generates a single illustration from a prompt and a reference photo.
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the given request.
    fn generate(&self, request: &ImageRequest) -> ImageFuture<'_>;
}

impl std::fmt::Debug for dyn ImageGenerator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ImageGenerator")
    }
}
