//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ReportConfig, DEFAULT_OUTPUT_DIR, DEFAULT_TODOS_URL, DEFAULT_USERS_URL};

/// Top-level CLI parser for `todo-reports`.
///
/// Every option has a default, so running without arguments fetches the
/// public API and writes into `./tasks`.
#[derive(Debug, Parser)]
#[command(name = "todo-reports", version, about = "Write per-user task reports")]
pub struct Cli {
    /// Endpoint returning the JSON array of tasks.
    #[arg(long, env = "TODO_REPORTS_TODOS_URL", default_value = DEFAULT_TODOS_URL)]
    pub todos_url: String,

    /// Endpoint returning the JSON array of users.
    #[arg(long, env = "TODO_REPORTS_USERS_URL", default_value = DEFAULT_USERS_URL)]
    pub users_url: String,

    /// Directory reports are written to.
    #[arg(long, env = "TODO_REPORTS_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Converts parsed arguments into a run configuration.
    #[must_use]
    pub fn into_config(self) -> ReportConfig {
        ReportConfig {
            todos_url: self.todos_url,
            users_url: self.users_url,
            output_dir: self.output_dir,
        }
    }
}
