//! The image fetch client: prompt → generation call → download → bitmap.

use chrono::{DateTime, Local};
use image::DynamicImage;

use crate::credential::Credential;
use crate::error::GenerationError;
use crate::params;
use crate::ports::{AssetFetcher, ImageGenerator, ImageRequest};
use crate::prompt::{build_prompt, InspirationWord};

/// One user action: the word to draw and the key to pay for it.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Inspiration word.
    pub word: InspirationWord,
    /// API credential; may be empty, in which case nothing is sent.
    pub credential: Credential,
}

/// A decoded mandala and where it came from.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Decoded pixels.
    pub bitmap: DynamicImage,
    /// The word the mandala was generated from.
    pub word: InspirationWord,
    /// When the image was produced.
    pub created_at: DateTime<Local>,
}

impl GeneratedImage {
    /// Width and height in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.bitmap.width(), self.bitmap.height())
    }
}

/// Composes the generator and fetcher ports into a single generation call.
pub struct MandalaClient {
    generator: Box<dyn ImageGenerator>,
    fetcher: Box<dyn AssetFetcher>,
}

impl MandalaClient {
    /// Create a client over the given ports.
    #[must_use]
    pub fn new(generator: Box<dyn ImageGenerator>, fetcher: Box<dyn AssetFetcher>) -> Self {
        Self { generator, fetcher }
    }

    /// Generate, download and decode one mandala.
    ///
    /// Performs no network I/O when the credential is empty, and never
    /// downloads when the generation call fails.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingCredential`], a transport failure from
    /// either call, or [`GenerationError::Decode`] when the bytes are not an image.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        if request.credential.is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let api_request = ImageRequest::mandala(build_prompt(&request.word));
        let reference = self.generator.generate(&api_request, &request.credential).await?;
        let asset = self.fetcher.fetch(&reference.url).await?;
        let bitmap = decode(&asset.data)?;
        if (bitmap.width(), bitmap.height()) != (params::EDGE_PX, params::EDGE_PX) {
            tracing::warn!(
                width = bitmap.width(),
                height = bitmap.height(),
                expected = params::SIZE,
                "image size differs from the requested size"
            );
        }

        tracing::info!(
            word = %request.word,
            width = bitmap.width(),
            height = bitmap.height(),
            "mandala generated"
        );

        Ok(GeneratedImage { bitmap, word: request.word.clone(), created_at: Local::now() })
    }
}

/// Decode raw bytes in whatever format they turn out to be.
fn decode(data: &[u8]) -> Result<DynamicImage, GenerationError> {
    if data.is_empty() {
        return Err(GenerationError::Decode("empty response body".into()));
    }
    image::load_from_memory(data).map_err(|e| GenerationError::Decode(e.to_string()))
}
