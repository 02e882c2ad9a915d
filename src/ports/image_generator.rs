//! Image generator port for the text-to-image API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::TransportError;
use crate::params;

/// A request to generate one image.
///
/// Carries no credential so it can be recorded safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Model identifier (e.g., `"dall-e-3"`).
    pub model: String,
    /// The full instruction text.
    pub prompt: String,
    /// Output size (e.g., `"1024x1024"`).
    pub size: String,
    /// Quality tier.
    pub quality: String,
    /// Style tier.
    pub style: String,
    /// Number of images to generate.
    pub count: u32,
}

impl ImageRequest {
    /// A request for `prompt` with the fixed mandala parameters.
    #[must_use]
    pub fn mandala(prompt: String) -> Self {
        Self {
            model: params::MODEL.to_string(),
            prompt,
            size: params::SIZE.to_string(),
            quality: params::QUALITY.to_string(),
            style: params::STYLE.to_string(),
            count: params::COUNT,
        }
    }
}

/// Where the API put the generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// URL of the produced asset.
    pub url: String,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageReference, TransportError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Submit the request and return a reference to the produced image.
    fn generate(&self, request: &ImageRequest, credential: &Credential) -> GenerateFuture<'_>;
}
