//! Core library entry for the `todo-reports` batch job.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod ports;
pub mod report;
pub mod writer;

use std::env;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::Parser;

use crate::context::ServiceContext;
use crate::error::{FetchError, RunError};
use crate::pipeline::RunSummary;

/// Environment variable naming a cassette file to record the run into.
pub const RECORD_ENV: &str = "TODO_REPORTS_RECORD";

/// Run the report job with the provided arguments.
///
/// When `TODO_REPORTS_RECORD` is set to a file path, all port interactions
/// are recorded to a YAML cassette at that path.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the run aborts.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let config = cli.into_config();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    let ctx = match env::var(RECORD_ENV) {
        Ok(path) => ServiceContext::recording(Path::new(&path)),
        Err(_) => ServiceContext::live(),
    };

    println!("Начало работы скрипта");
    let result = runtime.block_on(pipeline::generate_reports(&ctx, &config));

    // Finish recording after the run completes (even on error)
    conclude(result, ctx.finish())?;
    println!("Работа закончена");
    Ok(())
}

/// Merges the run outcome with the cassette outcome.
///
/// A run error wins over a cassette error; the latter is only logged then.
fn conclude(
    result: Result<RunSummary, RunError>,
    finished: Result<Option<PathBuf>, String>,
) -> Result<RunSummary, String> {
    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            if let Err(cassette_err) = finished {
                tracing::error!(error = %cassette_err, "recording not saved");
            }
            return Err(err.to_string());
        }
    };
    if let Some(path) = finished? {
        tracing::info!(path = %path.display(), "recording saved");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_prints_help_without_running() {
        assert!(run(["todo-reports", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_flag() {
        let err = run(["todo-reports", "--unknown"]).unwrap_err();
        assert!(err.contains("--unknown"));
    }

    #[test]
    fn run_error_is_kept_when_cassette_also_fails() {
        let result = Err(RunError::Fetch(FetchError::HttpStatus { status: 500 }));
        let err = conclude(result, Err("Failed to write cassette".into())).unwrap_err();
        assert!(err.contains("500"), "got {err}");
    }

    #[test]
    fn cassette_error_fails_an_otherwise_successful_run() {
        let err = conclude(Ok(RunSummary::default()), Err("Failed to write cassette".into()))
            .unwrap_err();
        assert_eq!(err, "Failed to write cassette");
    }
}
