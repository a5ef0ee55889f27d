//! Run configuration.

use std::path::PathBuf;

/// Default endpoint serving the task list.
pub const DEFAULT_TODOS_URL: &str = "https://json.medrating.org/todos";
/// Default endpoint serving the user list.
pub const DEFAULT_USERS_URL: &str = "https://json.medrating.org/users";
/// Default directory reports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "tasks";

/// Where to fetch records from and where to write reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Endpoint returning the JSON array of tasks.
    pub todos_url: String,
    /// Endpoint returning the JSON array of users.
    pub users_url: String,
    /// Directory holding `{username}.txt` reports.
    pub output_dir: PathBuf,
}

impl ReportConfig {
    /// Config pointing both endpoints at `base_url` (`{base}/todos`, `{base}/users`).
    #[must_use]
    pub fn with_base_url(base_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            todos_url: format!("{base}/todos"),
            users_url: format!("{base}/users"),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            todos_url: DEFAULT_TODOS_URL.to_string(),
            users_url: DEFAULT_USERS_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
