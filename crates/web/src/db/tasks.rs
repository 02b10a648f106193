//! `PostgreSQL` task repository.
//!
//! Comments live in a JSONB array on the task row; appending is a single
//! `UPDATE` so concurrent comments never overwrite each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use taskdesk_core::{TaskId, TaskStatus};

use super::{RepositoryError, TaskStore};
use crate::models::{Comment, Task, TaskFilter};

/// Internal row type for `PostgreSQL` task queries.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    assigned_to: String,
    priority: String,
    due_date: String,
    status: TaskStatus,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    comments: Json<Vec<Comment>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::new(row.id),
            title: row.title,
            description: row.description,
            assigned_to: row.assigned_to,
            priority: row.priority,
            due_date: row.due_date,
            status: row.status,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            comments: row.comments.0,
        }
    }
}

const TASK_COLUMNS: &str = "id, title, description, assigned_to, priority, due_date, status, \
                            created_by, created_at, updated_at, comments";

/// `NULL` parameters disable the corresponding constraint.
const FILTER_CLAUSE: &str =
    "($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR assigned_to = $2)";

/// Repository for task database operations.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_param(filter: &TaskFilter) -> Option<&str> {
    filter.status.as_ref().map(TaskStatus::as_str)
}

#[async_trait]
impl TaskStore for PgTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO taskdesk.task
                (id, title, description, assigned_to, priority, due_date, status,
                 created_by, created_at, updated_at, comments)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.assigned_to)
        .bind(&task.priority)
        .bind(&task.due_date)
        .bind(&task.status)
        .bind(&task.created_by)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(Json(&task.comments))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, RepositoryError> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM taskdesk.task WHERE {FILTER_CLAUSE} \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(status_param(filter))
            .bind(filter.assigned_to.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM taskdesk.task WHERE id = $1");
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE taskdesk.task SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status)
                .bind(updated_at)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn push_comment(&self, id: TaskId, comment: &Comment) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE taskdesk.task SET comments = comments || $2::jsonb WHERE id = $1",
        )
        .bind(id)
        .bind(Json(std::slice::from_ref(comment)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, filter: &TaskFilter) -> Result<i64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM taskdesk.task WHERE {FILTER_CLAUSE}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(status_param(filter))
            .bind(filter.assigned_to.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
