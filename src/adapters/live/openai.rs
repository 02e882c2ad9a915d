//! Live adapter for the `OpenAI` image generation API.

use reqwest::Client;
use serde::Deserialize;

use crate::credential::Credential;
use crate::error::TransportError;
use crate::params;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageReference, ImageRequest};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

/// Live `OpenAI` image generator that calls the `OpenAI` Images API.
pub struct OpenAiGenerator {
    client: Client,
}

impl OpenAiGenerator {
    /// Create a generator sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, request: &ImageRequest, credential: &Credential) -> GenerateFuture<'_> {
        let request = request.clone();
        let auth = format!("Bearer {}", credential.expose());
        Box::pin(async move {
            let body = request_body(&request);

            tracing::debug!(model = %request.model, size = %request.size, "submitting generation");
            let response =
                self.client.post(OPENAI_API_URL).header("Authorization", auth).json(&body).send().await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(TransportError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&response_text),
                });
            }

            parse_reference(&response_text)
        })
    }
}

/// JSON body of a generation call.
fn request_body(request: &ImageRequest) -> serde_json::Value {
    serde_json::json!({
        "model": request.model,
        "prompt": request.prompt,
        "n": request.count,
        "size": request.size,
        "quality": request.quality,
        "style": request.style,
        "response_format": params::RESPONSE_FORMAT,
    })
}

/// Extract the first image URL from a successful response body.
fn parse_reference(body: &str) -> Result<ImageReference, TransportError> {
    let parsed: OpenAiResponse = serde_json::from_str(body)
        .map_err(|e| TransportError::MalformedResponse(format!("Failed to parse response: {e}")))?;

    parsed
        .data
        .into_iter()
        .find_map(|item| item.url)
        .map(|url| ImageReference { url })
        .ok_or_else(|| {
            TransportError::MalformedResponse(format!("No image URL in response. Body: {}", truncate(body)))
        })
}

/// Prefer the API's own `error.message`; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiErrorResponse>(body)
        .map_or_else(|_| truncate(body), |e| e.error.message)
}

fn truncate(body: &str) -> String {
    if body.len() > 500 {
        let mut end = 500;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    message: String,
}
