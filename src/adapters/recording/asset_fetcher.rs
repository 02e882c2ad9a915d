//! Recording adapter for the `AssetFetcher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::asset_fetcher::{AssetFetcher, FetchFuture};

/// Records downloads while delegating to an inner implementation.
pub struct RecordingAssetFetcher {
    inner: Box<dyn AssetFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingAssetFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn AssetFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl AssetFetcher for RecordingAssetFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            record_result(&recorder, "asset_fetcher", "fetch", url.as_str(), &result);
            result
        })
    }
}
