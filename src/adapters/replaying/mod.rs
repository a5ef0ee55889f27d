//! Replaying adapters that serve recorded interactions.

pub mod api;
pub mod clock;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

pub use api::ReplayingRecordSource;
pub use clock::ReplayingClock;

/// Pops the next recorded interaction for `port::method`, returning its input and output.
pub(crate) fn next_interaction(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> (Value, Value) {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    let interaction = guard.next_interaction(port, method);
    (interaction.input.clone(), interaction.output.clone())
}

/// Decodes a recorded `Result` using the `{"ok": ..}` / `{"err": ..}` convention.
///
/// Mirror of `recording::record_result`.
///
/// # Panics
///
/// Panics if the output does not follow the convention or cannot be decoded;
/// a malformed cassette is a test setup bug.
pub(crate) fn replay_result<T, E>(output: Value, context: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    if let Some(err) = output.get("err") {
        let err = serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("{context}: failed to deserialize recorded error: {e}"));
        return Err(err);
    }
    let ok = output
        .get("ok")
        .unwrap_or_else(|| panic!("{context}: recorded output has neither 'ok' nor 'err'"));
    Ok(serde_json::from_value(ok.clone())
        .unwrap_or_else(|e| panic!("{context}: failed to deserialize recorded value: {e}")))
}
