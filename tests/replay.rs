//! Pipeline tests driven by recorded cassettes.
//!
//! The fixtures under `test_fixtures/` were captured from real sessions and
//! trimmed by hand; they exercise the full orchestration path without any
//! network access.

use std::path::Path;

use storybloom::context::ServiceContext;
use storybloom::pipeline::{generate_story, StoryJob};
use storybloom::ports::story_generator::StoryRequest;
use storybloom::story::STORY_PART_COUNT;

fn replay_ctx(fixture: &str) -> ServiceContext {
    let path = Path::new("test_fixtures").join(fixture);
    ServiceContext::replaying(&path).expect("fixture cassette should load")
}

fn illustrated_job(prompt: &str) -> StoryJob {
    StoryJob {
        story: StoryRequest::new(prompt, "4"),
        chinese_level: "beginner".to_string(),
        include_images: true,
        subject_reference: Some("https://media.example/child.jpg".to_string()),
        story_id: Some("replay-test".to_string()),
        aspect_ratio: "3:4".to_string(),
    }
}

#[tokio::test]
async fn replayed_session_attaches_images_in_part_order() {
    let ctx = replay_ctx("full_generation.cassette.yaml");
    let story = generate_story(&ctx, &illustrated_job("A panda who learns to share"))
        .await
        .expect("replayed generation should succeed");

    assert_eq!(story.title.english, "The Sharing Panda");
    assert_eq!(story.parts.len(), STORY_PART_COUNT);
    for (i, part) in story.parts.iter().enumerate() {
        let url = part.image.as_deref().expect("every part should carry an image");
        assert_eq!(url, format!("https://img.example/panda-{}.png", i + 1));
    }
}

#[tokio::test]
async fn replayed_image_failure_degrades_to_text_only() {
    let ctx = replay_ctx("image_failure.cassette.yaml");
    let story = generate_story(&ctx, &illustrated_job("A kitten who is afraid of rain"))
        .await
        .expect("a failed illustration batch must not fail the request");

    assert_eq!(story.parts.len(), STORY_PART_COUNT);
    // One recorded call failed, so the whole batch is dropped.
    assert!(story.parts.iter().all(|p| p.image.is_none()));
}

#[tokio::test]
async fn replayed_text_only_job_skips_image_interactions() {
    let ctx = replay_ctx("full_generation.cassette.yaml");
    let job =
        StoryJob::text_only(StoryRequest::new("A panda who learns to share", "4"), "beginner");
    let story = generate_story(&ctx, &job).await.unwrap();

    assert_eq!(story.title.chinese, "爱分享的熊猫");
    assert!(story.parts.iter().all(|p| p.image.is_none()));
}
