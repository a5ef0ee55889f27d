//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveRecordSource};
use crate::adapters::recording::{RecordingClock, RecordingFileSystem, RecordingRecordSource};
use crate::adapters::replaying::{ReplayingClock, ReplayingRecordSource};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::api::RecordSource;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Clock read once per run for the report timestamp.
    pub clock: Box<dyn Clock>,
    /// Filesystem reports are written through.
    pub fs: Box<dyn FileSystem>,
    /// Source of user and task records.
    pub source: Box<dyn RecordSource>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ServiceContext {
    /// Creates a live context: system clock, real disk, HTTP.
    #[must_use]
    pub fn live() -> Self {
        Self::with_ports(
            Box::new(LiveClock),
            Box::new(LiveFileSystem),
            Box::new(LiveRecordSource::new()),
        )
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn with_ports(
        clock: Box<dyn Clock>,
        fs: Box<dyn FileSystem>,
        source: Box<dyn RecordSource>,
    ) -> Self {
        Self { clock, fs, source, recorder: None, replayer: None }
    }

    /// Creates a live context that records every port interaction.
    ///
    /// The cassette is written to `path` by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "todo-reports-run")));
        Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            source: Box::new(RecordingRecordSource::new(
                Box::new(LiveRecordSource::new()),
                Arc::clone(&recorder),
            )),
            recorder: Some(recorder),
            replayer: None,
        }
    }

    /// Creates a context that replays the clock and API from a cassette.
    ///
    /// Reports are still written to the real filesystem, so a replayed run
    /// produces the same files the recorded one did.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self {
            clock: Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            fs: Box::new(LiveFileSystem),
            source: Box::new(ReplayingRecordSource::new(Arc::clone(&replayer))),
            recorder: None,
            replayer: Some(replayer),
        })
    }

    /// Number of replayed interactions not yet consumed; `0` for other contexts.
    #[must_use]
    pub fn unreplayed(&self) -> usize {
        self.replayer
            .as_ref()
            .map_or(0, |r| r.lock().expect("replayer lock poisoned").remaining())
    }

    /// Tears the context down, writing the cassette if it was recording.
    ///
    /// Returns the cassette path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error string if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Self { clock, fs, source, recorder, replayer: _ } = self;
        // Adapters hold clones of the recorder; drop them before unwrapping.
        drop((clock, fs, source));

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map(Some).map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_clock_and_reports_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "api".into(),
                    method: "fetch".into(),
                    input: json!({"url": "http://api/todos"}),
                    output: json!({"ok": []}),
                },
            ],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.unreplayed(), 2);
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(ctx.unreplayed(), 1);
        assert_eq!(ctx.finish().unwrap(), None);
    }

    #[test]
    fn recording_context_writes_cassette_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.cassette.yaml");

        let ctx = ServiceContext::recording(&path);
        let _ = ctx.clock.now();
        ctx.fs.create_dir_all(&dir.path().join("tasks")).unwrap();

        assert_eq!(ctx.finish().unwrap(), Some(path.clone()));
        let cassette = Cassette::load(&path).unwrap();
        let ports: Vec<&str> = cassette.interactions.iter().map(|i| i.port.as_str()).collect();
        assert_eq!(ports, ["clock", "fs"]);
    }

    #[test]
    fn replaying_missing_cassette_fails() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/run.yaml")).err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
