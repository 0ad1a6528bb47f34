//! Story orchestration: text generation first, then the concurrent
//! illustration fan-out, with graceful degradation when images fail.

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::StoryError;
use crate::ports::image_generator::{ImageGenerator, ImageRequest};
use crate::ports::story_generator::StoryRequest;
use crate::story::{BilingualStory, GeneratedImage, StoryPart};

/// Fixed style suffix appended to every illustration prompt so the five
/// images share one visual register.
pub const STYLE_SUFFIX: &str = "Children's book illustration style, warm and friendly, \
     high quality digital art, colorful and vibrant";

/// One story-generation job: the text request plus illustration options.
#[derive(Debug, Clone)]
pub struct StoryJob {
    /// The text-generation request.
    pub story: StoryRequest,
    /// Reader proficiency level. Accepted but reserved: generation does not
    /// consume it yet.
    pub chinese_level: String,
    /// Whether to run the illustration stage.
    pub include_images: bool,
    /// Reference photo URL conditioning the illustrations.
    pub subject_reference: Option<String>,
    /// Caller-supplied correlation id, used in logs only.
    pub story_id: Option<String>,
    /// Aspect ratio for the illustrations.
    pub aspect_ratio: String,
}

impl StoryJob {
    /// A text-only job with the default aspect ratio.
    #[must_use]
    pub fn text_only(story: StoryRequest, chinese_level: impl Into<String>) -> Self {
        Self {
            story,
            chinese_level: chinese_level.into(),
            include_images: false,
            subject_reference: None,
            story_id: None,
            aspect_ratio: "3:4".to_string(),
        }
    }
}

/// Generate one illustration per part, all dispatched concurrently, results
/// joined in input order.
///
/// All-or-nothing: a single failed call fails the whole batch and no
/// partial image set survives.
///
/// # Errors
///
/// Returns the first [`StoryError`] any call produced.
pub async fn illustrate_parts(
    generator: &dyn ImageGenerator,
    parts: &[StoryPart],
    subject_reference: &str,
    aspect_ratio: &str,
    story_id: &str,
) -> Result<Vec<GeneratedImage>, StoryError> {
    info!(story_id, count = parts.len(), "generating illustrations");

    let requests: Vec<ImageRequest> = parts
        .iter()
        .map(|part| ImageRequest {
            prompt: format!("{}. {STYLE_SUFFIX}.", part.image_prompt),
            subject_reference: subject_reference.to_string(),
            aspect_ratio: aspect_ratio.to_string(),
        })
        .collect();

    // Order-preserving parallel join: result i corresponds to part i.
    let images = try_join_all(requests.iter().map(|request| generator.generate(request))).await?;

    info!(story_id, count = images.len(), "illustrations generated");
    Ok(images)
}

/// Attach generated images to their parts, index for index.
#[must_use]
pub fn attach_images(parts: &[StoryPart], images: Vec<GeneratedImage>) -> Vec<StoryPart> {
    parts
        .iter()
        .zip(images)
        .map(|(part, image)| StoryPart { image: Some(image.url), ..part.clone() })
        .collect()
}

/// Run the full pipeline: text generation, then optionally the illustration
/// stage.
///
/// Text failure fails the operation. Illustration failure of any kind —
/// missing credential included — is logged and downgraded to the text-only
/// story; it never fails a request whose text already succeeded.
///
/// # Errors
///
/// Returns an error only from the text stage: a missing Gemini credential
/// or a [`StoryError::Generation`] violation.
pub async fn generate_story(
    ctx: &ServiceContext,
    job: &StoryJob,
) -> Result<BilingualStory, StoryError> {
    let story_id = job.story_id.as_deref().unwrap_or("unknown");
    debug!(story_id, chinese_level = %job.chinese_level, "starting story pipeline");

    let story = ctx.stories()?.generate(&job.story).await?;
    info!(story_id, title = %story.title.english, "story text generated");

    if !job.include_images {
        return Ok(story);
    }
    let Some(subject_reference) = job.subject_reference.as_deref() else {
        return Ok(story);
    };

    let generator = match ctx.images() {
        Ok(generator) => generator,
        Err(e) => {
            warn!(story_id, error = %e, "image generator unavailable, returning text-only story");
            return Ok(story);
        }
    };

    match illustrate_parts(generator, &story.parts, subject_reference, &job.aspect_ratio, story_id)
        .await
    {
        Ok(images) => {
            let parts = attach_images(&story.parts, images);
            Ok(BilingualStory { title: story.title, parts })
        }
        Err(e) => {
            warn!(story_id, error = %e, "illustration stage failed, returning text-only story");
            Ok(story)
        }
    }
}
