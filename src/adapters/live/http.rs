//! Live adapter that downloads generated assets over plain HTTP.

use reqwest::Client;

use crate::error::TransportError;
use crate::ports::asset_fetcher::{AssetBytes, AssetFetcher, FetchFuture};

/// Fetches asset URLs with a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            tracing::debug!("downloading generated image");
            let response = self.client.get(&url).send().await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(TransportError::Api { status: status.as_u16(), message });
            }

            let data = response.bytes().await?.to_vec();
            tracing::debug!(bytes = data.len(), "download complete");
            Ok(AssetBytes { data })
        })
    }
}
