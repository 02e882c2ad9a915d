//! Recording adapters that capture interactions to cassettes.

pub mod asset_fetcher;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Values that fail to serialize are recorded as `null` and logged.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize + ?Sized,
{
    let input_json = serde_json::to_value(input).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize {port}::{method} input: {e}");
        serde_json::Value::Null
    });

    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).unwrap_or_else(|e| {
                tracing::warn!("failed to serialize {port}::{method} output: {e}");
                serde_json::Value::Null
            });
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => tracing::warn!("recorder lock poisoned, dropping interaction: {e}"),
    }
}
