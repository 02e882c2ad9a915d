//! Replaying adapters that serve recorded interactions from cassettes.

pub mod asset_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::TransportError;

/// Deserialize the next recorded output for `port::method` as `Result<T, _>`.
///
/// A recorded `Err`, a missing interaction, or an unreadable `Ok` value all
/// surface as [`TransportError::Replayed`].
pub(crate) fn replay_next<T: serde::de::DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<T, TransportError> {
    let output = {
        let mut guard = replayer
            .lock()
            .map_err(|e| TransportError::Replayed(format!("replayer lock poisoned: {e}")))?;
        let output =
            guard.next_interaction(port, method).map_err(TransportError::Replayed)?.output.clone();
        output
    };

    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(TransportError::Replayed(msg));
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok_val).map_err(|e| {
        TransportError::Replayed(format!("unreadable recorded {port}::{method} output: {e}"))
    })
}
