//! Replaying adapter for the `RecordSource` port.

use std::sync::{Arc, Mutex};

use super::{next_interaction, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::FetchError;
use crate::ports::api::{FetchFuture, RecordSource};

/// Serves recorded API responses from a cassette.
///
/// Fetches must happen in the recorded order: each call checks that the
/// requested URL is the one stored in the next interaction.
pub struct ReplayingRecordSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingRecordSource {
    /// Creates a replaying record source backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl RecordSource for ReplayingRecordSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        let (input, output) = next_interaction(&self.replayer, "api", "fetch");
        let recorded_url = input.get("url").and_then(|u| u.as_str()).unwrap_or_default();
        assert_eq!(
            recorded_url, url,
            "api::fetch: cassette recorded a fetch of {recorded_url:?} but {url:?} was requested"
        );
        Box::pin(async move { replay_result::<_, FetchError>(output, "api::fetch") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn source(interactions: Vec<Interaction>) -> ReplayingRecordSource {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions,
        };
        ReplayingRecordSource::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    fn fetch(seq: u64, url: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "api".into(),
            method: "fetch".into(),
            input: json!({ "url": url }),
            output,
        }
    }

    #[tokio::test]
    async fn replays_recorded_records() {
        let src = source(vec![fetch(0, "http://api/todos", json!({"ok": [{"userId": 1}]}))]);
        let records = src.fetch("http://api/todos").await.unwrap();
        assert_eq!(records, vec![json!({"userId": 1})]);
    }

    #[tokio::test]
    async fn replays_recorded_fetch_error() {
        let src = source(vec![fetch(
            0,
            "http://api/users",
            json!({"err": {"kind": "http_status", "status": 500}}),
        )]);
        let err = src.fetch("http://api/users").await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { status: 500 });
    }

    #[test]
    #[should_panic(expected = "was requested")]
    fn out_of_order_fetch_panics() {
        let src = source(vec![fetch(0, "http://api/todos", json!({"ok": []}))]);
        let _ = src.fetch("http://api/users");
    }
}
