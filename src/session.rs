//! Per-session display state, threaded explicitly through the front end.

use crate::client::{GeneratedImage, GenerationRequest, MandalaClient};
use crate::credential::Credential;
use crate::error::GenerationError;
use crate::prompt::InspirationWord;

/// What the session currently shows: exactly one image or one error.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The last generation produced this image.
    Success(GeneratedImage),
    /// The last generation failed with this one-line message.
    Failure(String),
}

/// The state of one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    last_word: Option<InspirationWord>,
    outcome: Option<Outcome>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the display and remember `word` ahead of a generation.
    pub fn begin(&mut self, word: InspirationWord) {
        self.outcome = None;
        self.last_word = Some(word);
    }

    /// Record the result of the generation started by [`Session::begin`].
    pub fn complete(&mut self, result: Result<GeneratedImage, GenerationError>) -> &Outcome {
        self.outcome.insert(match result {
            Ok(image) => Outcome::Success(image),
            Err(e) => {
                tracing::warn!(error = ?e, "generation failed");
                Outcome::Failure(e.to_string())
            }
        })
    }

    /// Run one generation for `word`, replacing whatever was shown before.
    pub async fn generate(
        &mut self,
        client: &MandalaClient,
        word: InspirationWord,
        credential: &Credential,
    ) -> &Outcome {
        self.begin(word.clone());
        let request = GenerationRequest { word, credential: credential.clone() };
        let result = client.generate(&request).await;
        self.complete(result)
    }

    /// Drop the current image and word so a new one can be generated.
    pub fn clear(&mut self) {
        self.outcome = None;
        self.last_word = None;
    }

    /// The current image, if the last generation succeeded.
    #[must_use]
    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.outcome {
            Some(Outcome::Success(image)) => Some(image),
            _ => None,
        }
    }

    /// The current error message, if the last generation failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failure(message)) => Some(message),
            _ => None,
        }
    }

    /// The word of the most recent generation.
    #[must_use]
    pub fn last_word(&self) -> Option<&InspirationWord> {
        self.last_word.as_ref()
    }

    /// True when neither an image nor an error is shown.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.outcome.is_none()
    }
}
