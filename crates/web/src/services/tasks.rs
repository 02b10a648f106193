//! Task service.
//!
//! Creation, lookup, status updates, comments, and dashboard statistics on
//! top of a [`TaskStore`].

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use taskdesk_core::{TaskId, TaskStatus};

use crate::db::{RepositoryError, TaskStore};
use crate::models::{Comment, CurrentUser, NewTask, Task, TaskFilter};

/// Errors that can occur during task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with the requested ID.
    #[error("task not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TaskError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Task counts shown on dashboards.
///
/// Each field is an independent count, so the four may be momentarily
/// inconsistent with each other under concurrent writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub review: i64,
}

/// Task service.
pub struct TaskService<'a> {
    tasks: &'a dyn TaskStore,
}

impl<'a> TaskService<'a> {
    /// Create a new task service.
    #[must_use]
    pub const fn new(tasks: &'a dyn TaskStore) -> Self {
        Self { tasks }
    }

    /// Create a task in the `assigned` state with no comments.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Repository` if the insert fails.
    pub async fn create_task(&self, new: NewTask, creator: &str) -> Result<TaskId, TaskError> {
        let task = Task {
            id: TaskId::generate(),
            title: new.title,
            description: new.description,
            assigned_to: new.assigned_to,
            priority: new.priority,
            due_date: new.due_date,
            status: TaskStatus::Assigned,
            created_by: creator.to_owned(),
            created_at: Utc::now(),
            updated_at: None,
            comments: Vec::new(),
        };
        self.tasks.insert(&task).await?;

        info!(task_id = %task.id, assigned_to = %task.assigned_to, "Task created");
        Ok(task.id)
    }

    /// Tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Repository` if the query fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task has this ID.
    pub async fn get_task(&self, id: TaskId) -> Result<Task, TaskError> {
        self.tasks.get(id).await?.ok_or(TaskError::NotFound)
    }

    /// Overwrite a task's status. Any value is accepted from any state.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task has this ID.
    pub async fn update_status(&self, id: TaskId, status: &TaskStatus) -> Result<(), TaskError> {
        self.tasks.update_status(id, status, Utc::now()).await?;
        info!(task_id = %id, status = %status, "Task status updated");
        Ok(())
    }

    /// Append a comment authored by the current user.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task has this ID.
    pub async fn append_comment(
        &self,
        id: TaskId,
        author: &CurrentUser,
        text: &str,
    ) -> Result<(), TaskError> {
        let comment = Comment {
            text: text.to_owned(),
            author: author.full_name.clone(),
            username: author.username.clone(),
            timestamp: Utc::now(),
        };
        self.tasks.push_comment(id, &comment).await?;
        info!(task_id = %id, username = %author.username, "Comment added");
        Ok(())
    }

    /// Count tasks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Repository` if the query fails.
    pub async fn count(&self, filter: &TaskFilter) -> Result<i64, TaskError> {
        Ok(self.tasks.count(filter).await?)
    }

    /// Dashboard statistics, optionally scoped to one assignee.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Repository` if any count fails.
    pub async fn stats(&self, assigned_to: Option<&str>) -> Result<TaskStats, TaskError> {
        let base = TaskFilter {
            status: None,
            assigned_to: assigned_to.map(str::to_owned),
        };
        let with = |status| base.clone().with_status(status);

        Ok(TaskStats {
            total: self.count(&base).await?,
            completed: self.count(&with(TaskStatus::Completed)).await?,
            in_progress: self.count(&with(TaskStatus::InProgress)).await?,
            review: self.count(&with(TaskStatus::Review)).await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use taskdesk_core::{Role, UserId};

    use super::*;
    use crate::db::MemoryStore;

    fn new_task(assigned_to: &str) -> NewTask {
        NewTask {
            title: "Quarterly report".to_owned(),
            description: "Numbers".to_owned(),
            assigned_to: assigned_to.to_owned(),
            priority: "high".to_owned(),
            due_date: "not a date".to_owned(),
        }
    }

    fn bob() -> CurrentUser {
        CurrentUser {
            id: UserId::generate(),
            username: "bob".to_owned(),
            role: Role::Employee,
            full_name: "Bob Builder".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_create_task_starts_assigned() {
        let store = MemoryStore::new();
        let service = TaskService::new(&store);

        let id = service.create_task(new_task("bob"), "admin").await.unwrap();
        let task = service.get_task(id).await.unwrap();

        assert_eq!(task.status, TaskStatus::Assigned);
        assert_eq!(task.created_by, "admin");
        assert_eq!(task.due_date, "not a date");
        assert!(task.comments.is_empty());
        assert!(task.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_update_status_accepts_any_value() {
        let store = MemoryStore::new();
        let service = TaskService::new(&store);
        let id = service.create_task(new_task("bob"), "admin").await.unwrap();

        service.update_status(id, &TaskStatus::Completed).await.unwrap();
        service.update_status(id, &TaskStatus::Assigned).await.unwrap();
        service
            .update_status(id, &TaskStatus::parse("blocked"))
            .await
            .unwrap();

        let task = service.get_task(id).await.unwrap();
        assert_eq!(task.status.as_str(), "blocked");
        assert!(task.updated_at.unwrap() >= task.created_at);
    }

    #[tokio::test]
    async fn test_comments_keep_insertion_order() {
        let store = MemoryStore::new();
        let service = TaskService::new(&store);
        let id = service.create_task(new_task("bob"), "admin").await.unwrap();

        service.append_comment(id, &bob(), "first").await.unwrap();
        service.append_comment(id, &bob(), "second").await.unwrap();

        let task = service.get_task(id).await.unwrap();
        let texts: Vec<_> = task.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(task.comments[0].author, "Bob Builder");
        assert_eq!(task.comments[0].username, "bob");
    }

    #[tokio::test]
    async fn test_missing_task_is_not_found() {
        let store = MemoryStore::new();
        let service = TaskService::new(&store);
        let missing = TaskId::generate();

        assert!(matches!(service.get_task(missing).await, Err(TaskError::NotFound)));
        assert!(matches!(
            service.update_status(missing, &TaskStatus::Review).await,
            Err(TaskError::NotFound)
        ));
        assert!(matches!(
            service.append_comment(missing, &bob(), "hi").await,
            Err(TaskError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_stats_scoped_and_global() {
        let store = MemoryStore::new();
        let service = TaskService::new(&store);
        let a = service.create_task(new_task("bob"), "admin").await.unwrap();
        let b = service.create_task(new_task("bob"), "admin").await.unwrap();
        service.create_task(new_task("alice"), "admin").await.unwrap();
        service.update_status(a, &TaskStatus::Completed).await.unwrap();
        service.update_status(b, &TaskStatus::Review).await.unwrap();

        let global = service.stats(None).await.unwrap();
        assert_eq!(
            global,
            TaskStats {
                total: 3,
                completed: 1,
                in_progress: 0,
                review: 1
            }
        );

        let alice = service.stats(Some("alice")).await.unwrap();
        assert_eq!(alice.total, 1);
        assert_eq!(alice.completed, 0);
    }
}
