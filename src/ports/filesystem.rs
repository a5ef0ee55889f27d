//! Filesystem port for report persistence.

use std::path::Path;

/// Provides the filesystem operations needed to write and rotate reports.
///
/// Abstracting the filesystem allows recording a run and exercising the
/// writer against fakes that fail on demand.
pub trait FileSystem: Send + Sync {
    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Creates a directory and any missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Renames `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is missing or the rename is not permitted.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
