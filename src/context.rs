//! Service context that bundles all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;

use crate::adapters::live::cloudinary::CloudinaryStore;
use crate::adapters::live::gemini::GeminiStoryGenerator;
use crate::adapters::live::replicate::ReplicateImageGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::recording::story_generator::RecordingStoryGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::adapters::replaying::story_generator::ReplayingStoryGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::StoryError;
use crate::ports::{ImageGenerator, MediaStore, StoryGenerator};

/// Upper bound on any single upstream call. Generation is slow; retries do
/// not exist, so the limit is generous.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(180);

/// Bundles the port trait objects behind per-port accessors.
///
/// A port is registered only when its credential is configured; the
/// accessors fail with [`StoryError::MissingApiKey`] before any network
/// call when it is not.
#[derive(Default)]
pub struct ServiceContext {
    /// Story generator port, present when the Gemini key is configured.
    pub story_generator: Option<Box<dyn StoryGenerator>>,
    /// Image generator port, present when the Replicate key is configured.
    pub image_generator: Option<Box<dyn ImageGenerator>>,
    /// Media store port, present when the Cloudinary URL is configured.
    pub media_store: Option<Box<dyn MediaStore>>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context from the configuration, registering an adapter
    /// for each provider whose credential is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a configured
    /// connection string is malformed. A missing credential is not an error
    /// here; it surfaces from the accessor at call time.
    pub fn live(config: &Config) -> Result<Self, StoryError> {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| StoryError::Config(format!("failed to build HTTP client: {e}")))?;

        let story_generator: Option<Box<dyn StoryGenerator>> =
            config.gemini_key().map(|key| {
                Box::new(GeminiStoryGenerator::new(
                    client.clone(),
                    key,
                    config.defaults.story_model.clone(),
                )) as Box<dyn StoryGenerator>
            });

        let image_generator: Option<Box<dyn ImageGenerator>> =
            config.replicate_key().map(|key| {
                Box::new(ReplicateImageGenerator::new(
                    client.clone(),
                    key,
                    config.defaults.image_model.clone(),
                )) as Box<dyn ImageGenerator>
            });

        let media_store: Option<Box<dyn MediaStore>> = match config.cloudinary_url() {
            Some(url) => Some(Box::new(CloudinaryStore::from_url(
                client,
                &url,
                config.defaults.upload_folder.clone(),
            )?)),
            None => None,
        };

        Ok(Self { story_generator, image_generator, media_store })
    }

    /// Create a recording context that wraps the live generator adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be initialized.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), StoryError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = std::path::PathBuf::from(".storybloom/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("generation.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-generation"),
            &commit,
        )));

        let story_generator = live_ctx.story_generator.map(|inner| {
            Box::new(RecordingStoryGenerator::new(inner, Arc::clone(&recorder)))
                as Box<dyn StoryGenerator>
        });
        let image_generator = live_ctx.image_generator.map(|inner| {
            Box::new(RecordingImageGenerator::new(inner, Arc::clone(&recorder)))
                as Box<dyn ImageGenerator>
        });

        let ctx = Self { story_generator, image_generator, media_store: live_ctx.media_store };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file. The media store is
    /// not recorded and stays unconfigured.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StoryError> {
        let replayer = load_cassette(path)
            .map_err(|e| StoryError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));

        Ok(Self {
            story_generator: Some(Box::new(ReplayingStoryGenerator::new(Arc::clone(&replayer)))),
            image_generator: Some(Box::new(ReplayingImageGenerator::new(replayer))),
            media_store: None,
        })
    }

    /// The story generator, or `MissingApiKey` when unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::MissingApiKey`] if the Gemini key is absent.
    pub fn stories(&self) -> Result<&dyn StoryGenerator, StoryError> {
        self.story_generator
            .as_deref()
            .ok_or_else(|| StoryError::missing_key("Gemini", "GOOGLE_API_KEY"))
    }

    /// The image generator, or `MissingApiKey` when unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::MissingApiKey`] if the Replicate key is absent.
    pub fn images(&self) -> Result<&dyn ImageGenerator, StoryError> {
        self.image_generator
            .as_deref()
            .ok_or_else(|| StoryError::missing_key("Replicate", "REPLICATE_API_KEY"))
    }

    /// The media store, or `MissingApiKey` when unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::MissingApiKey`] if the Cloudinary URL is absent.
    pub fn media(&self) -> Result<&dyn MediaStore, StoryError> {
        self.media_store
            .as_deref()
            .ok_or_else(|| StoryError::missing_key("Cloudinary", "CLOUDINARY_URL"))
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
