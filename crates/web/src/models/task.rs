//! Task domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskdesk_core::{TaskId, TaskStatus};

/// A task assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Username of the assignee. Not a foreign key: it keeps pointing at the
    /// username after that account is deleted.
    pub assigned_to: String,
    pub priority: String,
    /// Due date exactly as submitted; never parsed.
    pub due_date: String,
    pub status: TaskStatus,
    /// Username of the admin who created the task.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Set by every status update.
    pub updated_at: Option<DateTime<Utc>>,
    /// Append-only, in insertion order.
    pub comments: Vec<Comment>,
}

/// A comment embedded in a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    /// Display name of the author at the time of writing.
    pub author: String,
    /// Username of the author.
    pub username: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied by an admin when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: String,
    pub due_date: String,
}

/// Exact-match constraints for task listing and counting.
///
/// A `None` field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
}

impl TaskFilter {
    /// A filter matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to tasks with the given status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to tasks assigned to the given username.
    #[must_use]
    pub fn assigned_to(mut self, username: impl Into<String>) -> Self {
        self.assigned_to = Some(username.into());
        self
    }

    /// Whether a task satisfies every constraint of this filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.as_ref().is_none_or(|s| *s == task.status)
            && self
                .assigned_to
                .as_deref()
                .is_none_or(|a| a == task.assigned_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(assigned_to: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::generate(),
            title: "Write report".to_owned(),
            description: String::new(),
            assigned_to: assigned_to.to_owned(),
            priority: "high".to_owned(),
            due_date: "2026-11-01".to_owned(),
            status,
            created_by: "admin".to_owned(),
            created_at: Utc::now(),
            updated_at: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(TaskFilter::all().matches(&task("bob", TaskStatus::Review)));
    }

    #[test]
    fn test_filter_fields_combine_with_and() {
        let filter = TaskFilter::all()
            .assigned_to("bob")
            .with_status(TaskStatus::Completed);

        assert!(filter.matches(&task("bob", TaskStatus::Completed)));
        assert!(!filter.matches(&task("bob", TaskStatus::Assigned)));
        assert!(!filter.matches(&task("alice", TaskStatus::Completed)));
    }

    #[test]
    fn test_assignee_match_is_exact() {
        let filter = TaskFilter::all().assigned_to("bob");
        assert!(!filter.matches(&task("Bob", TaskStatus::Assigned)));
        assert!(!filter.matches(&task("bobby", TaskStatus::Assigned)));
    }
}
