//! Asset fetcher port: a plain GET of the generated image.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Raw bytes retrieved from an asset URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBytes {
    /// Response body.
    #[serde(with = "crate::ports::base64_bytes")]
    pub data: Vec<u8>,
}

/// Boxed future type returned by [`AssetFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AssetBytes, TransportError>> + Send + 'a>>;

/// Retrieves the bytes behind an asset URL.
pub trait AssetFetcher: Send + Sync {
    /// Fetch the body at `url`.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_bytes_are_base64_in_json() {
        let asset = AssetBytes { data: vec![0x89, 0x50, 0x4E, 0x47] };
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["data"], "iVBORw==");
        let back: AssetBytes = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
    }
}
