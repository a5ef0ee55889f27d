//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn record<T: Serialize, I: Serialize>(
        &self,
        method: &str,
        input: &I,
        result: &Result<T, Box<dyn std::error::Error + Send + Sync>>,
    ) {
        let result = result.as_ref().map_err(ToString::to_string);
        record_result(&self.recorder, "fs", method, input, &result);
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: String,
    contents: &'a str,
}

#[derive(Serialize)]
struct RenameInput {
    from: String,
    to: String,
}

impl FileSystem for RecordingFileSystem {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), contents };
        self.record("write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let input = PathInput { path: path.display().to_string() };
        record_interaction(&self.recorder, "fs", "exists", &input, &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.create_dir_all(path);
        self.record("create_dir_all", &PathInput { path: path.display().to_string() }, &result);
        result
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.rename(from, to);
        let input = RenameInput { from: from.display().to_string(), to: to.display().to_string() };
        self.record("rename", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_writes_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("fs.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test")));

        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            fs.write(&dir.path().join("alice.txt"), "report").unwrap();
            assert!(fs.exists(&dir.path().join("alice.txt")));
            assert!(fs.rename(&dir.path().join("missing.txt"), &dir.path().join("x.txt")).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&cassette_path).unwrap();
        let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
        assert_eq!(methods, ["write", "exists", "rename"]);
        assert_eq!(cassette.interactions[0].output, serde_json::json!({"ok": null}));
        assert!(cassette.interactions[2].output.get("err").is_some());
    }
}
