//! Replaying adapter for the `AssetFetcher` port.

use std::sync::{Arc, Mutex};

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::asset_fetcher::{AssetBytes, AssetFetcher, FetchFuture};

/// Serves recorded downloads from a cassette.
pub struct ReplayingAssetFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingAssetFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl AssetFetcher for ReplayingAssetFetcher {
    fn fetch(&self, _url: &str) -> FetchFuture<'_> {
        let result = replay_next::<AssetBytes>(&self.replayer, "asset_fetcher", "fetch");
        Box::pin(async move { result })
    }
}
