//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::credential::Credential;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageReference, ImageRequest};

/// Serves recorded image references from a cassette.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, _request: &ImageRequest, _credential: &Credential) -> GenerateFuture<'_> {
        let result = replay_next::<ImageReference>(&self.replayer, "image_generator", "generate");
        Box::pin(async move { result })
    }
}
