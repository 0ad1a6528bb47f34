//! Replaying adapter for the `StoryGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::StoryError;
use crate::ports::story_generator::{StoryFuture, StoryGenerator, StoryRequest};
use crate::story::BilingualStory;

/// Serves recorded story generation results from a cassette.
pub struct ReplayingStoryGenerator {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingStoryGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }
}

impl StoryGenerator for ReplayingStoryGenerator {
    fn generate(&self, _request: &StoryRequest) -> StoryFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "story_generator", "generate");
        Box::pin(async move {
            replay_result::<BilingualStory>(output)
                .map_err(|e| StoryError::Generation(e.to_string()))
        })
    }
}
