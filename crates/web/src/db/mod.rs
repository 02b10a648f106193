//! Persistence for users and tasks.
//!
//! # Schema: `taskdesk`
//!
//! ## Tables
//!
//! - `app_user` - Accounts (unique `username`, Argon2 password hash, role)
//! - `task` - Tasks with their comments embedded as a JSONB array
//! - `tower_sessions.session` - Session records (managed by the session store)
//!
//! Handlers never touch a pool directly: they go through the [`UserStore`]
//! and [`TaskStore`] traits, implemented by the `PostgreSQL` repositories and
//! by [`MemoryStore`] for tests and local development.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p taskdesk-cli -- migrate
//! ```

pub mod memory;
pub mod tasks;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use taskdesk_core::{Role, TaskId, TaskStatus, UserId};

use crate::models::{Comment, Task, TaskFilter, User};

pub use memory::MemoryStore;
pub use tasks::PgTaskRepository;
pub use users::PgUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account with its password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken. The
    /// store is left unchanged in that case.
    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError>;

    /// Look up an account and its stored password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// List all accounts with the given role, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, RepositoryError>;

    /// Whether at least one account has the given role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn exists_with_role(&self, role: Role) -> Result<bool, RepositoryError>;

    /// Delete an account. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store does not answer.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Task storage.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn insert(&self, task: &Task) -> Result<(), RepositoryError>;

    /// List tasks matching the filter, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, RepositoryError>;

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    async fn get(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Overwrite a task's status and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no task has this ID.
    async fn update_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Append a comment to a task's comment list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no task has this ID.
    async fn push_comment(&self, id: TaskId, comment: &Comment) -> Result<(), RepositoryError>;

    /// Count tasks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn count(&self, filter: &TaskFilter) -> Result<i64, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations against the pool.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a unique-violation into `RepositoryError::Conflict`.
fn conflict_or_database(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
