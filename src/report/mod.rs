//! Report text generation.

pub mod index;

use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::model::{Task, User};

pub use index::TaskIndex;

/// Maximum number of characters of a task title kept in a report.
pub const MAX_TITLE_CHARS: usize = 50;

const COMPLETED_HEADING: &str = "Завершенные задачи:";
const REMAINING_HEADING: &str = "Оставшиеся задачи:";
const NO_COMPLETED: &str = "У пользователя нет завершенных задач";
const NO_REMAINING: &str = "У пользователя не осталось задач";

/// Wall-clock time shared by every report of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp(NaiveDateTime);

impl RunTimestamp {
    /// Wraps a local wall-clock time.
    #[must_use]
    pub fn new(local: NaiveDateTime) -> Self {
        Self(local)
    }

    /// Converts an instant to the local wall-clock time of this machine.
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&Local).naive_local())
    }

    /// Format used in the report header, e.g. `15.06.2024 10:30`.
    #[must_use]
    pub fn header(&self) -> String {
        self.0.format("%d.%m.%Y %H:%M").to_string()
    }

    /// Format used when rotating old reports, e.g. `2024-06-15T10:30`.
    #[must_use]
    pub fn file_suffix(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M").to_string()
    }
}

/// Truncates a title to at most [`MAX_TITLE_CHARS`] characters.
#[must_use]
pub fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((byte_idx, _)) => &title[..byte_idx],
        None => title,
    }
}

/// Renders the completed and remaining task blocks for one user.
#[must_use]
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut completed = format!("{COMPLETED_HEADING}\n");
    let mut remaining = format!("{REMAINING_HEADING}\n");
    let mut any_completed = false;
    let mut any_remaining = false;

    for task in tasks {
        let title = truncate_title(&task.title);
        if task.completed {
            any_completed = true;
            let _ = writeln!(completed, "{title}");
        } else {
            any_remaining = true;
            let _ = writeln!(remaining, "{title}");
        }
    }

    if !any_completed {
        let _ = writeln!(completed, "{NO_COMPLETED}");
    }
    if !any_remaining {
        let _ = writeln!(remaining, "{NO_REMAINING}");
    }

    completed + "\n" + &remaining
}

/// Renders the full report for `user`.
#[must_use]
pub fn render_report(user: &User, tasks: &[Task], timestamp: RunTimestamp) -> String {
    format!(
        "{name}<{email}> {time}\n{company}\n\n{body}",
        name = user.name,
        email = user.email,
        time = timestamp.header(),
        company = user.company,
        body = render_tasks(tasks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> RunTimestamp {
        RunTimestamp::new(
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap().and_hms_opt(9, 7, 42).unwrap(),
        )
    }

    fn task(title: &str, completed: bool) -> Task {
        Task { user_id: 1, title: title.into(), completed }
    }

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            company: "Acme".into(),
        }
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(ts().header(), "05.06.2024 09:07");
        assert_eq!(ts().file_suffix(), "2024-06-05T09:07");
    }

    #[test]
    fn short_title_is_untouched() {
        assert_eq!(truncate_title("Buy milk"), "Buy milk");
    }

    #[test]
    fn long_title_keeps_first_fifty_chars() {
        let title = "x".repeat(80);
        assert_eq!(truncate_title(&title), "x".repeat(50));

        let exact = "y".repeat(50);
        assert_eq!(truncate_title(&exact), exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "я".repeat(60);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), 50);
        assert_eq!(truncated, "я".repeat(50));
    }

    #[test]
    fn no_tasks_renders_both_sentinels() {
        assert_eq!(
            render_tasks(&[]),
            "Завершенные задачи:\nУ пользователя нет завершенных задач\n\n\
             Оставшиеся задачи:\nУ пользователя не осталось задач\n"
        );
    }

    #[test]
    fn tasks_are_partitioned_in_order() {
        let tasks = [task("one", true), task("two", false), task("three", true)];
        assert_eq!(
            render_tasks(&tasks),
            "Завершенные задачи:\none\nthree\n\nОставшиеся задачи:\ntwo\n"
        );
    }

    #[test]
    fn only_remaining_tasks_uses_completed_sentinel() {
        let rendered = render_tasks(&[task("open", false)]);
        assert!(rendered.starts_with("Завершенные задачи:\nУ пользователя нет завершенных задач\n"));
        assert!(rendered.ends_with("Оставшиеся задачи:\nopen\n"));
    }

    #[test]
    fn full_report_layout() {
        let tasks = [task("Buy milk", false), task("Write report", true)];
        assert_eq!(
            render_report(&alice(), &tasks, ts()),
            "Alice<a@x.com> 05.06.2024 09:07\nAcme\n\n\
             Завершенные задачи:\nWrite report\n\n\
             Оставшиеся задачи:\nBuy milk\n"
        );
    }
}
