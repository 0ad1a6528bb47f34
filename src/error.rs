//! Unified error type for storybloom.

use thiserror::Error;

/// Errors that can occur while generating, illustrating, or uploading.
#[derive(Debug, Error)]
pub enum StoryError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed or missing caller input.
    #[error("{0}")]
    Validation(String),

    /// The text model produced output that failed structural or content
    /// validation. Always fails the whole story.
    #[error("Story generation failed: {0}")]
    Generation(String),

    /// An image-generation call failed.
    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    /// A media-store upload failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// No API key configured for the provider.
    #[error("{provider} API key is not configured. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl StoryError {
    /// Shorthand for a missing-credential error.
    #[must_use]
    pub fn missing_key(provider: &str, env_var: &str) -> Self {
        Self::MissingApiKey { provider: provider.to_string(), env_var: env_var.to_string() }
    }
}
