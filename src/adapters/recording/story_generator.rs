//! Recording adapter for the `StoryGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::story_generator::{StoryFuture, StoryGenerator, StoryRequest};

/// Records story generation interactions while delegating to an inner
/// implementation.
pub struct RecordingStoryGenerator {
    inner: Box<dyn StoryGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingStoryGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn StoryGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl StoryGenerator for RecordingStoryGenerator {
    fn generate(&self, request: &StoryRequest) -> StoryFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request_clone).await;
            record_result(&recorder, "story_generator", "generate", &request_clone, &result);
            result
        })
    }
}
