//! One-pass index of tasks by owning user.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::Task;

/// Tasks grouped by `userId`, in the order the API returned them.
///
/// Built once per run and only read afterwards, so the order in which users
/// are processed never changes which tasks a user sees.
#[derive(Debug, Default)]
pub struct TaskIndex {
    by_user: HashMap<i64, Vec<Task>>,
    skipped: usize,
}

impl TaskIndex {
    /// Validates every raw task record and groups the valid ones by owner.
    ///
    /// Malformed records are logged with their content and counted in
    /// [`TaskIndex::skipped`].
    #[must_use]
    pub fn build(records: &[Value]) -> Self {
        let mut index = Self::default();
        for record in records {
            match Task::from_value(record) {
                Ok(task) => index.by_user.entry(task.user_id).or_default().push(task),
                Err(err) => {
                    tracing::warn!(error = %err, %record, "could not recognise task, skipping");
                    index.skipped += 1;
                }
            }
        }
        index
    }

    /// Tasks owned by `user_id`; empty when the user has none.
    #[must_use]
    pub fn tasks_for(&self, user_id: i64) -> &[Task] {
        self.by_user.get(&user_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of records rejected during [`TaskIndex::build`].
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of valid tasks indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_user.values().map(Vec::len).sum()
    }

    /// Returns `true` when no valid task was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}
