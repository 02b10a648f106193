//! Template view models.
//!
//! Domain types flattened into display strings so templates stay free of
//! formatting logic.

use chrono::{DateTime, Utc};

use taskdesk_core::TaskStatus;

use crate::models::{Comment, Task, User};
use crate::services::dashboard::FILTER_ALL;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// A task as shown in lists and on the detail page.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: String,
    pub due_date: String,
    pub status: String,
    pub status_label: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub comments: Vec<CommentView>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            status: task.status.as_str().to_owned(),
            status_label: task.status.label().into_owned(),
            title: task.title,
            description: task.description,
            assigned_to: task.assigned_to,
            priority: task.priority,
            due_date: task.due_date,
            created_by: task.created_by,
            created_at: format_timestamp(task.created_at),
            updated_at: task.updated_at.map(format_timestamp),
            comments: task.comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// A comment under a task.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub text: String,
    pub author: String,
    pub username: String,
    pub timestamp: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            text: comment.text,
            author: comment.author,
            username: comment.username,
            timestamp: format_timestamp(comment.timestamp),
        }
    }
}

/// An employee row.
#[derive(Debug, Clone)]
pub struct EmployeeView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
}

impl From<User> for EmployeeView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            created_at: format_timestamp(user.created_at),
        }
    }
}

/// An `<option>` in a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// Options for a dashboard status filter, with "All" first.
#[must_use]
pub fn status_filter_options(current: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(FILTER_ALL, "All", current))
        .chain(
            TaskStatus::KNOWN
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.label(), current)),
        )
        .collect()
}

/// Options for the status update form.
///
/// A non-standard current status is kept as an extra option so the form
/// does not silently change it.
#[must_use]
pub fn status_update_options(current: &TaskStatus) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = TaskStatus::KNOWN
        .iter()
        .map(|s| SelectOption::new(s.as_str(), s.label(), current.as_str()))
        .collect();
    if !current.is_known() {
        options.push(SelectOption::new(
            current.as_str(),
            current.label(),
            current.as_str(),
        ));
    }
    options
}

/// Options for the dashboard employee filter, with "All" first.
#[must_use]
pub fn employee_filter_options(employees: &[EmployeeView], current: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(FILTER_ALL, "All employees", current))
        .chain(
            employees
                .iter()
                .map(|e| SelectOption::new(e.username.as_str(), e.full_name.as_str(), current)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_options_select_current() {
        let options = status_filter_options("review");
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, "all");
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "review");
    }

    #[test]
    fn test_status_update_options_keep_unknown_status() {
        let options = status_update_options(&TaskStatus::parse("blocked"));
        assert_eq!(options.len(), 5);
        let last = options.last().map(|o| (o.value.as_str(), o.selected));
        assert_eq!(last, Some(("blocked", true)));

        let options = status_update_options(&TaskStatus::InProgress);
        assert_eq!(options.len(), 4);
        assert!(options.iter().any(|o| o.value == "in_progress" && o.selected));
    }
}
