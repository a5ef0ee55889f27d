//! Persists reports to the output directory, rotating earlier versions.

use std::path::{Path, PathBuf};

use crate::error::WriteError;
use crate::ports::FileSystem;
use crate::report::RunTimestamp;

/// Writes `{dir}/{username}.txt` reports through the filesystem port.
pub struct ReportWriter<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
    timestamp: RunTimestamp,
}

impl<'a> ReportWriter<'a> {
    /// Creates a writer targeting `dir`; `timestamp` names rotated files.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, dir: impl Into<PathBuf>, timestamp: RunTimestamp) -> Self {
        Self { fs, dir: dir.into(), timestamp }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the current report for `username`.
    #[must_use]
    pub fn report_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.txt"))
    }

    /// Path an existing report for `username` is rotated to.
    #[must_use]
    pub fn rotated_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}_{}.txt", self.timestamp.file_suffix()))
    }

    /// Creates the output directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::CreateDir`] if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<(), WriteError> {
        self.fs
            .create_dir_all(&self.dir)
            .map_err(|source| WriteError::CreateDir { path: self.dir.clone(), source })
    }

    /// Rotates any existing report for `username`, then writes `report`.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Rotate`] if the previous report cannot be moved
    /// aside (the new report is not written in that case), or
    /// [`WriteError::Write`] if the new report cannot be written.
    pub fn persist(&self, username: &str, report: &str) -> Result<PathBuf, WriteError> {
        let path = self.report_path(username);

        if self.fs.exists(&path) {
            let rotated = self.rotated_path(username);
            if self.fs.exists(&rotated) {
                tracing::warn!(
                    path = %rotated.display(),
                    "rotated report from this minute already exists, replacing it"
                );
            }
            self.fs.rename(&path, &rotated).map_err(|source| WriteError::Rotate {
                from: path.clone(),
                to: rotated.clone(),
                source,
            })?;
            tracing::debug!(from = %path.display(), to = %rotated.display(), "rotated report");
        }

        self.fs
            .write(&path, report)
            .map_err(|source| WriteError::Write { path: path.clone(), source })?;
        Ok(path)
    }
}
