//! Report generation run: fetch, index, render, persist.

use crate::config::ReportConfig;
use crate::context::ServiceContext;
use crate::error::RunError;
use crate::model::User;
use crate::report::{render_report, RunTimestamp, TaskIndex};
use crate::writer::ReportWriter;

/// Outcome counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Reports successfully written.
    pub written: usize,
    /// User records skipped as malformed.
    pub skipped_users: usize,
    /// Task records skipped as malformed.
    pub skipped_tasks: usize,
    /// Reports that could not be rotated or written.
    pub failed_writes: usize,
}

/// Generates one report per user.
///
/// Tasks are fetched before users; either fetch failing aborts the run
/// before anything touches the output directory. Malformed records and
/// per-user write failures are logged and counted, not returned.
///
/// # Errors
///
/// Returns [`RunError::Fetch`] if either dataset cannot be fetched, or
/// [`RunError::OutputDir`] if the output directory cannot be created.
pub async fn generate_reports(
    ctx: &ServiceContext,
    config: &ReportConfig,
) -> Result<RunSummary, RunError> {
    let timestamp = RunTimestamp::from_utc(ctx.clock.now());

    let todos = ctx.source.fetch(&config.todos_url).await?;
    let users = ctx.source.fetch(&config.users_url).await?;
    tracing::info!(tasks = todos.len(), users = users.len(), "fetched records");

    let writer = ReportWriter::new(&*ctx.fs, &config.output_dir, timestamp);
    writer.ensure_dir()?;

    let index = TaskIndex::build(&todos);
    tracing::info!(indexed = index.len(), skipped = index.skipped(), "indexed tasks");
    if index.is_empty() {
        tracing::warn!("no valid tasks fetched, every report will be empty");
    }
    let mut summary = RunSummary { skipped_tasks: index.skipped(), ..RunSummary::default() };

    for record in &users {
        let user = match User::from_value(record) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, %record, "could not recognise user, skipping");
                summary.skipped_users += 1;
                continue;
            }
        };

        let report = render_report(&user, index.tasks_for(user.id), timestamp);
        match writer.persist(&user.username, &report) {
            Ok(path) => {
                tracing::debug!(username = %user.username, path = %path.display(), "wrote report");
                summary.written += 1;
            }
            Err(err) => {
                tracing::error!(username = %user.username, error = %err, "failed to write report");
                summary.failed_writes += 1;
            }
        }
    }

    tracing::info!(
        written = summary.written,
        skipped_users = summary.skipped_users,
        skipped_tasks = summary.skipped_tasks,
        failed_writes = summary.failed_writes,
        "report generation finished"
    );
    Ok(summary)
}
