//! In-process endpoint tests — no network I/O.
//!
//! Stub port implementations stand in for the hosted APIs; every request is
//! driven through the real router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use storybloom::config::DefaultsConfig;
use storybloom::context::ServiceContext;
use storybloom::error::StoryError;
use storybloom::ports::image_generator::{ImageFuture, ImageGenerator, ImageRequest};
use storybloom::ports::media_store::{MediaStore, StoredMedia, UploadFuture, UploadRequest};
use storybloom::ports::story_generator::{StoryFuture, StoryGenerator, StoryRequest};
use storybloom::server::{router, AppState};
use storybloom::story::{BilingualStory, GeneratedImage, StoryPart, StoryTitle, STORY_PART_COUNT};

// --- Stub ports ---

fn fixture_story() -> BilingualStory {
    BilingualStory {
        title: StoryTitle { english: "The Brave Mouse".into(), chinese: "勇敢的小老鼠".into() },
        parts: (1..=STORY_PART_COUNT)
            .map(|i| StoryPart {
                english: format!("Scene {i}."),
                chinese: "小老鼠出发了。".into(),
                image_prompt: format!("scene {i}"),
                image: None,
            })
            .collect(),
    }
}

struct StubStories;

impl StoryGenerator for StubStories {
    fn generate(&self, _request: &StoryRequest) -> StoryFuture<'_> {
        Box::pin(async { Ok(fixture_story()) })
    }
}

/// Echoes the prompt into the generated URL.
struct EchoImages;

impl ImageGenerator for EchoImages {
    fn generate(&self, request: &ImageRequest) -> ImageFuture<'_> {
        let prompt = request.prompt.clone();
        Box::pin(async move { Ok(GeneratedImage { url: format!("https://img.example/{prompt}") }) })
    }
}

/// Simulates an unreachable image service.
struct UnreachableImages;

impl ImageGenerator for UnreachableImages {
    fn generate(&self, _request: &ImageRequest) -> ImageFuture<'_> {
        Box::pin(async { Err(StoryError::ImageGeneration("connection refused".into())) })
    }
}

struct StubMedia;

impl MediaStore for StubMedia {
    fn upload(&self, request: &UploadRequest) -> UploadFuture<'_> {
        let size = request.data.len();
        Box::pin(async move {
            Ok(StoredMedia { url: format!("https://media.example/uploads/{size}.png") })
        })
    }
}

fn app(ctx: ServiceContext) -> Router {
    router(AppState::new(ctx, DefaultsConfig::default()))
}

fn full_ctx() -> ServiceContext {
    ServiceContext {
        story_generator: Some(Box::new(StubStories)),
        image_generator: Some(Box::new(EchoImages)),
        media_store: Some(Box::new(StubMedia)),
    }
}

// --- Request helpers ---

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn story_body() -> Value {
    json!({
        "prompt": "A brave little mouse",
        "ageGroup": "3-5",
        "chineseLevel": "beginner"
    })
}

// --- Story endpoint ---

#[tokio::test]
async fn story_descriptor_lists_required_fields() {
    let (status, body) = get(app(full_ctx()), "/api/generate-story").await;
    assert_eq!(status, StatusCode::OK);
    let required: Vec<&str> =
        body["requiredFields"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(required, vec!["prompt", "ageGroup", "chineseLevel"]);
}

#[tokio::test]
async fn story_missing_fields_yield_400_naming_them() {
    let (status, body) =
        post_json(app(full_ctx()), "/api/generate-story", json!({"prompt": "a mouse"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("ageGroup"));
    assert!(error.contains("chineseLevel"));
    assert!(!error.contains("prompt,"));
}

#[tokio::test]
async fn story_invalid_subject_reference_yields_400() {
    let mut body = story_body();
    body["includeImages"] = json!(true);
    body["subjectReference"] = json!("not a url");

    let (status, response) = post_json(app(full_ctx()), "/api/generate-story", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("valid HTTP/HTTPS URL"));
}

#[tokio::test]
async fn story_text_only_scenario() {
    let mut body = story_body();
    body["includeImages"] = json!(false);

    let (status, response) = post_json(app(full_ctx()), "/api/generate-story", body).await;
    assert_eq!(status, StatusCode::OK);

    let parts = response["story"]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), STORY_PART_COUNT);
    for part in parts {
        assert!(part.get("image").is_none(), "text-only story must carry no image fields");
    }
}

#[tokio::test]
async fn story_with_images_populates_every_part_in_order() {
    let mut body = story_body();
    body["includeImages"] = json!(true);
    body["subjectReference"] = json!("https://media.example/child.jpg");

    let (status, response) = post_json(app(full_ctx()), "/api/generate-story", body).await;
    assert_eq!(status, StatusCode::OK);

    let parts = response["story"]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), STORY_PART_COUNT);
    for (i, part) in parts.iter().enumerate() {
        let url = part["image"].as_str().expect("every part should carry an image URL");
        assert!(url.contains(&format!("scene {}", i + 1)), "part {i} got {url}");
    }
}

#[tokio::test]
async fn story_degrades_when_image_service_unreachable() {
    let ctx = ServiceContext {
        story_generator: Some(Box::new(StubStories)),
        image_generator: Some(Box::new(UnreachableImages)),
        media_store: None,
    };
    let mut body = story_body();
    body["includeImages"] = json!(true);
    body["subjectReference"] = json!("https://media.example/child.jpg");

    let (status, response) = post_json(app(ctx), "/api/generate-story", body).await;

    // Image failure never fails the request once text succeeded.
    assert_eq!(status, StatusCode::OK);
    let parts = response["story"]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), STORY_PART_COUNT);
    for part in parts {
        assert!(part.get("image").is_none(), "all-or-nothing: no image may survive");
    }
}

#[tokio::test]
async fn story_missing_gemini_key_yields_classified_500() {
    let ctx = ServiceContext::default();
    let (status, body) = post_json(app(ctx), "/api/generate-story", story_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Gemini API key is not configured"));
}

// --- Images endpoint ---

#[tokio::test]
async fn images_descriptor_responds() {
    let (status, body) = get(app(full_ctx()), "/api/generate-images").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoint"], "POST /api/generate-images");
}

#[tokio::test]
async fn images_empty_parts_yield_400() {
    let body = json!({"storyParts": [], "subjectReference": "https://media.example/child.jpg"});
    let (status, response) = post_json(app(full_ctx()), "/api/generate-images", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("storyParts"));
}

#[tokio::test]
async fn images_missing_subject_reference_yields_400() {
    let body = json!({"storyParts": [{"imagePrompt": "a mouse"}]});
    let (status, response) = post_json(app(full_ctx()), "/api/generate-images", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("subjectReference"));
}

#[tokio::test]
async fn images_part_without_prompt_yields_400() {
    let body = json!({
        "storyParts": [{"imagePrompt": "a mouse"}, {"english": "no prompt here"}],
        "subjectReference": "https://media.example/child.jpg"
    });
    let (status, response) = post_json(app(full_ctx()), "/api/generate-images", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("Story part 2"));
}

#[tokio::test]
async fn images_success_returns_one_image_per_part() {
    let body = json!({
        "storyParts": [
            {"imagePrompt": "a mouse at dawn"},
            {"imagePrompt": "a mouse at sea"},
            {"imagePrompt": "a mouse at rest"}
        ],
        "subjectReference": "https://media.example/child.jpg",
        "storyId": "abc123"
    });
    let (status, response) = post_json(app(full_ctx()), "/api/generate-images", body).await;
    assert_eq!(status, StatusCode::OK);

    let images = response["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    assert!(images[1]["url"].as_str().unwrap().contains("a mouse at sea"));
    assert_eq!(response["message"], "Successfully generated 3 images");
}

#[tokio::test]
async fn images_missing_replicate_key_yields_classified_500() {
    let ctx = ServiceContext {
        story_generator: Some(Box::new(StubStories)),
        image_generator: None,
        media_store: None,
    };
    let body = json!({
        "storyParts": [{"imagePrompt": "a mouse"}],
        "subjectReference": "https://media.example/child.jpg"
    });
    let (status, response) = post_json(app(ctx), "/api/generate-images", body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["error"].as_str().unwrap().contains("Replicate API key is not configured"));
}

// --- Upload endpoint ---

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn multipart_request(uri: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "storybloom-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"photo\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_without_file_yields_400() {
    let boundary = "storybloom-test-boundary";
    let body = format!("--{boundary}--\r\n");
    let request = Request::post("/api/upload-image")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();

    let (status, response) = send(app(full_ctx()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "No file provided");
}

#[tokio::test]
async fn upload_non_image_mime_yields_400() {
    let request = multipart_request("/api/upload-image", "text/plain", b"hello");
    let (status, response) = send(app(full_ctx()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Only image uploads are supported");
}

#[tokio::test]
async fn upload_undetectable_image_yields_400() {
    // Claims to be a PNG but carries no image magic.
    let request = multipart_request("/api/upload-image", "image/png", b"definitely not pixels");
    let (status, response) = send(app(full_ctx()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("not a recognizable image"));
}

#[tokio::test]
async fn upload_success_returns_durable_url() {
    let request = multipart_request("/api/upload-image", "image/png", &PNG_MAGIC);
    let (status, response) = send(app(full_ctx()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response["url"].as_str().unwrap().starts_with("https://media.example/uploads/"));
    assert_eq!(response["message"], "Image uploaded successfully");
}

#[tokio::test]
async fn upload_without_media_store_yields_classified_500() {
    let ctx = ServiceContext::default();
    let request = multipart_request("/api/upload-image", "image/png", &PNG_MAGIC);
    let (status, response) = send(app(ctx), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["error"].as_str().unwrap().contains("Cloudinary"));
}

// --- Health ---

#[tokio::test]
async fn health_reports_configured_providers() {
    let (status, body) = get(app(full_ctx()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"]["gemini"], true);
    assert_eq!(body["providers"]["replicate"], true);
    assert_eq!(body["providers"]["cloudinary"], true);

    let (_, body) = get(app(ServiceContext::default()), "/health").await;
    assert_eq!(body["providers"]["gemini"], false);
}
