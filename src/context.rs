//! Service context that wires the client to live, recording or replaying adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::http::HttpFetcher;
use crate::adapters::live::openai::OpenAiGenerator;
use crate::adapters::recording::asset_fetcher::RecordingAssetFetcher;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::asset_fetcher::ReplayingAssetFetcher;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::client::MandalaClient;
use crate::error::AppError;
use crate::ports::{AssetFetcher, ImageGenerator};

/// Owns the client the session generates through.
pub struct ServiceContext {
    /// Generation client.
    pub client: MandalaClient,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapters are still alive or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a context that talks to the real endpoints.
    #[must_use]
    pub fn live() -> Self {
        let http = reqwest::Client::new();
        let client = MandalaClient::new(
            Box::new(OpenAiGenerator::new(http.clone())),
            Box::new(HttpFetcher::new(http)),
        );
        Self { client }
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    #[must_use]
    pub fn recording() -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".mandala/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        let recorder =
            CassetteRecorder::new(path, format!("{timestamp}-session"), get_commit_hash());

        let http = reqwest::Client::new();
        Self::recording_over(
            Box::new(OpenAiGenerator::new(http.clone())),
            Box::new(HttpFetcher::new(http)),
            recorder,
        )
    }

    /// Wrap the given ports so every call lands in `recorder`.
    fn recording_over(
        generator: Box<dyn ImageGenerator>,
        fetcher: Box<dyn AssetFetcher>,
        recorder: CassetteRecorder,
    ) -> (Self, RecordingSession) {
        let recorder = Arc::new(Mutex::new(recorder));
        let client = MandalaClient::new(
            Box::new(RecordingImageGenerator::new(generator, Arc::clone(&recorder))),
            Box::new(RecordingAssetFetcher::new(fetcher, Arc::clone(&recorder))),
        );
        (Self { client }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, AppError> {
        let replayer = load_cassette(path)
            .map_err(|e| AppError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let client = MandalaClient::new(
            Box::new(ReplayingImageGenerator::new(Arc::clone(&replayer))),
            Box::new(ReplayingAssetFetcher::new(replayer)),
        );
        Ok(Self { client })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GenerationRequest;
    use crate::credential::Credential;
    use crate::error::{GenerationError, TransportError};
    use crate::ports::asset_fetcher::{AssetBytes, FetchFuture};
    use crate::ports::image_generator::{GenerateFuture, ImageReference, ImageRequest};
    use crate::prompt::InspirationWord;

    const URL: &str = "https://images.example.com/mandala.png";
    const SECRET: &str = "sk-SECRET-do-not-record";

    struct FixedGenerator;

    impl ImageGenerator for FixedGenerator {
        fn generate(&self, _request: &ImageRequest, credential: &Credential) -> GenerateFuture<'_> {
            assert_eq!(credential.expose(), SECRET);
            Box::pin(async { Ok(ImageReference { url: URL.into() }) })
        }
    }

    /// Serves a 7x5 PNG on the first call, a 403 afterwards.
    struct OnceFetcher {
        served: Mutex<bool>,
    }

    impl AssetFetcher for OnceFetcher {
        fn fetch(&self, _url: &str) -> FetchFuture<'_> {
            let first = {
                let mut served = self.served.lock().unwrap();
                !std::mem::replace(&mut *served, true)
            };
            Box::pin(async move {
                if first {
                    let img = image::DynamicImage::new_rgb8(7, 5);
                    let mut buf = std::io::Cursor::new(Vec::new());
                    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
                    Ok(AssetBytes { data: buf.into_inner() })
                } else {
                    Err(TransportError::Api { status: 403, message: "expired".into() })
                }
            })
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            word: InspirationWord::parse("ocean").unwrap(),
            credential: Credential::new(SECRET),
        }
    }

    #[tokio::test]
    async fn recorded_session_replays_without_credential() {
        let dir = std::env::temp_dir().join("mandala_context_record_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("session.cassette.yaml");

        let (ctx, session) = ServiceContext::recording_over(
            Box::new(FixedGenerator),
            Box::new(OnceFetcher { served: Mutex::new(false) }),
            CassetteRecorder::new(&path, "record-test", "deadbeef"),
        );
        let first = ctx.client.generate(&request()).await.unwrap();
        assert_eq!(first.dimensions(), (7, 5));
        assert!(ctx.client.generate(&request()).await.is_err());
        drop(ctx);

        let written = session.finish().unwrap();
        assert_eq!(written, path);
        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(!yaml.contains(SECRET), "credential leaked into cassette");
        assert_eq!(yaml.matches("port: image_generator").count(), 2);
        assert_eq!(yaml.matches("port: asset_fetcher").count(), 2);
        assert!(yaml.contains(URL));

        let replay = ServiceContext::replaying(&path).unwrap();
        let replayed = replay.client.generate(&request()).await.unwrap();
        assert_eq!(replayed.dimensions(), (7, 5));
        let err = replay.client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(TransportError::Replayed(_))));
        assert_eq!(err.to_string(), "API error (403): expired");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn finish_fails_while_adapters_alive() {
        let path = std::env::temp_dir().join("mandala_context_alive.cassette.yaml");
        let (ctx, session) = ServiceContext::recording_over(
            Box::new(FixedGenerator),
            Box::new(OnceFetcher { served: Mutex::new(false) }),
            CassetteRecorder::new(&path, "alive", "deadbeef"),
        );
        let err = session.finish().unwrap_err();
        assert!(err.contains("still has references"));
        drop(ctx);
    }
}
