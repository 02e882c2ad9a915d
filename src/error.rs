//! Error types for mandala generation and the surrounding CLI.

use thiserror::Error;

/// Failures of a single generation, as seen by the session.
///
/// Every variant displays as one line; front ends prefix it with `Error: `.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was supplied; nothing was sent over the network.
    #[error("Please supply an OpenAI API key (--api-key, OPENAI_API_KEY or the config file).")]
    MissingCredential,

    /// The generation call or the image retrieval failed.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The retrieved bytes are not a decodable image.
    #[error("Could not decode image: {0}")]
    Decode(String),
}

/// Anything that went wrong talking to the image service or the asset host.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Body or message returned by the remote.
        message: String,
    },

    /// The request never completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered successfully but the body was not what we expected.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A failure served from a cassette.
    #[error("{0}")]
    Replayed(String),
}

/// Top-level errors of the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// A generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Encoding the bitmap for export failed.
    #[error("Image encoding error: {0}")]
    ImageEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_single_line_without_prefix() {
        let err = GenerationError::from(TransportError::Api {
            status: 401,
            message: "invalid api key".into(),
        });
        let msg = err.to_string();
        assert_eq!(msg, "API error (401): invalid api key");
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn missing_credential_mentions_key() {
        assert!(GenerationError::MissingCredential.to_string().contains("API key"));
    }

    #[test]
    fn app_error_is_transparent_over_generation() {
        let err = AppError::from(GenerationError::Decode("bad magic".into()));
        assert_eq!(err.to_string(), "Could not decode image: bad magic");
    }
}
