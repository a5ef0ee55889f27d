//! Recording adapter for the `RecordSource` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::api::{FetchFuture, RecordSource};

/// Records API fetches while delegating to an inner implementation.
pub struct RecordingRecordSource {
    inner: Box<dyn RecordSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRecordSource {
    /// Creates a new recording record source wrapping the given implementation.
    pub fn new(inner: Box<dyn RecordSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct FetchInput<'a> {
    url: &'a str,
}

impl RecordSource for RecordingRecordSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let result = self.inner.fetch(url).await;
            record_result(&self.recorder, "api", "fetch", &FetchInput { url }, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingRecordSource;
    use crate::cassette::format::Cassette;
    use crate::cassette::replayer::CassetteReplayer;
    use crate::error::FetchError;
    use serde_json::{json, Value};

    /// Serves a fixed response for every URL.
    struct StaticSource(Result<Vec<Value>, FetchError>);

    impl RecordSource for StaticSource {
        fn fetch<'a>(&'a self, _url: &'a str) -> FetchFuture<'a> {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn recorded_fetches_replay_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "api")));

        {
            let ok = RecordingRecordSource::new(
                Box::new(StaticSource(Ok(vec![json!({"id": 1})]))),
                Arc::clone(&recorder),
            );
            ok.fetch("http://api/users").await.unwrap();

            let failing = RecordingRecordSource::new(
                Box::new(StaticSource(Err(FetchError::HttpStatus { status: 502 }))),
                Arc::clone(&recorder),
            );
            failing.fetch("http://api/todos").await.unwrap_err();
        }

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        let replay = ReplayingRecordSource::new(Arc::new(Mutex::new(CassetteReplayer::new(
            &cassette,
        ))));
        assert_eq!(replay.fetch("http://api/users").await.unwrap(), vec![json!({"id": 1})]);
        assert_eq!(
            replay.fetch("http://api/todos").await.unwrap_err(),
            FetchError::HttpStatus { status: 502 }
        );
    }
}
