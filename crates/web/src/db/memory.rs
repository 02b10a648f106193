//! In-memory implementation of the store traits.
//!
//! Backs the integration tests and `TASKDESK_STORE=memory`. Every operation
//! takes the lock once, so each one is atomic with respect to the others.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use taskdesk_core::{Role, TaskId, TaskStatus, UserId};

use super::{RepositoryError, TaskStore, UserStore};
use crate::models::{Comment, Task, TaskFilter, User};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<(User, String)>,
    tasks: HashMap<TaskId, Task>,
}

/// Process-local store for accounts and tasks.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        inner.users.push((user.clone(), password_hash.to_owned()));
        Ok(())
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .cloned())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|(u, _)| u.role == role)
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn exists_with_role(&self, role: Role) -> Result<bool, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().any(|(u, _)| u.role == role))
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|(u, _)| u.id != id);
        Ok(inner.users.len() != before)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, RepositoryError> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let task = inner.tasks.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        task.status = status.clone();
        task.updated_at = Some(updated_at);
        Ok(())
    }

    async fn push_comment(&self, id: TaskId, comment: &Comment) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let task = inner.tasks.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        task.comments.push(comment.clone());
        Ok(())
    }

    async fn count(&self, filter: &TaskFilter) -> Result<i64, RepositoryError> {
        let inner = self.inner.read().await;
        let n = inner.tasks.values().filter(|t| filter.matches(t)).count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user(username: &str, role: Role) -> User {
        User {
            id: UserId::generate(),
            username: username.to_owned(),
            email: format!("{username}@company.com"),
            full_name: username.to_uppercase(),
            role,
            created_at: Utc::now(),
        }
    }

    fn task(assigned_to: &str, created_at: DateTime<Utc>) -> Task {
        Task {
            id: TaskId::generate(),
            title: format!("task for {assigned_to}"),
            description: String::new(),
            assigned_to: assigned_to.to_owned(),
            priority: "medium".to_owned(),
            due_date: String::new(),
            status: TaskStatus::Assigned,
            created_by: "admin".to_owned(),
            created_at,
            updated_at: None,
            comments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected_without_mutation() {
        let store = MemoryStore::new();
        UserStore::insert(&store, &user("bob", Role::Employee), "h1")
            .await
            .unwrap();

        let err = UserStore::insert(&store, &user("bob", Role::Admin), "h2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let (stored, hash) = store.find_credentials("bob").await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Employee);
        assert_eq!(hash, "h1");
        assert!(!store.exists_with_role(Role::Admin).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_admit_one_username() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    UserStore::insert(&store, &user("carol", Role::Employee), "h").await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list_by_role(Role::Employee).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        let bob = user("bob", Role::Employee);
        UserStore::insert(&store, &bob, "h").await.unwrap();

        assert!(store.delete(bob.id).await.unwrap());
        assert!(!store.delete(bob.id).await.unwrap());
        assert!(store.find_credentials("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filtered() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let old = task("bob", now - Duration::hours(2));
        let new = task("bob", now);
        let other = task("alice", now - Duration::hours(1));
        for t in [&old, &new, &other] {
            TaskStore::insert(&store, t).await.unwrap();
        }

        let all = store.list(&TaskFilter::all()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![new.id, other.id, old.id]);

        let bobs = store.list(&TaskFilter::all().assigned_to("bob")).await.unwrap();
        assert_eq!(bobs.len(), 2);
        assert_eq!(store.count(&TaskFilter::all().assigned_to("bob")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mutations_on_missing_task_are_not_found() {
        let store = MemoryStore::new();
        let missing = TaskId::generate();

        let err = store
            .update_status(missing, &TaskStatus::Completed, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let comment = Comment {
            text: "hello".to_owned(),
            author: "Bob".to_owned(),
            username: "bob".to_owned(),
            timestamp: Utc::now(),
        };
        let err = store.push_comment(missing, &comment).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
