//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::credential::Credential;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest};

/// Records generation calls while delegating to an inner implementation.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &ImageRequest, credential: &Credential) -> GenerateFuture<'_> {
        let request = request.clone();
        let credential = credential.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request, &credential).await;
            // Credential is never recorded.
            record_result(&recorder, "image_generator", "generate", &request, &result);
            result
        })
    }
}
