//! Dashboard queries.
//!
//! Assembles what the admin and employee dashboards show. Filter values come
//! straight from the query string; `all` and empty mean no constraint.

use taskdesk_core::TaskStatus;

use super::auth::{AuthError, CredentialService};
use super::tasks::{TaskError, TaskService, TaskStats};
use crate::models::{Task, TaskFilter, User};

/// Query-string value meaning "no constraint".
pub const FILTER_ALL: &str = "all";

/// Data behind the admin dashboard.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub tasks: Vec<Task>,
    pub employees: Vec<User>,
    /// Global totals, independent of the active filters.
    pub stats: TaskStats,
}

/// Data behind an employee's dashboard.
#[derive(Debug, Clone)]
pub struct EmployeeDashboard {
    pub tasks: Vec<Task>,
    /// Totals over the employee's own tasks.
    pub stats: TaskStats,
}

/// Errors from dashboard assembly.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Tasks(#[from] TaskError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Turn a raw filter value into a constraint.
#[must_use]
pub fn filter_value(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.is_empty() && *v != FILTER_ALL)
}

/// Read-side queries for both dashboards.
pub struct DashboardQueries<'a> {
    tasks: TaskService<'a>,
    credentials: CredentialService<'a>,
}

impl<'a> DashboardQueries<'a> {
    /// Create the query layer over the two services.
    #[must_use]
    pub const fn new(tasks: TaskService<'a>, credentials: CredentialService<'a>) -> Self {
        Self { tasks, credentials }
    }

    /// Tasks matching both filters, all employees, and global stats.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if any underlying query fails.
    pub async fn admin_view(
        &self,
        status: Option<&str>,
        employee: Option<&str>,
    ) -> Result<AdminDashboard, DashboardError> {
        let filter = TaskFilter {
            status: filter_value(status).map(TaskStatus::parse),
            assigned_to: filter_value(employee).map(str::to_owned),
        };

        Ok(AdminDashboard {
            tasks: self.tasks.list_tasks(&filter).await?,
            employees: self.credentials.list_employees().await?,
            stats: self.tasks.stats(None).await?,
        })
    }

    /// The employee's own tasks (optionally by status) and own stats.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if any underlying query fails.
    pub async fn employee_view(
        &self,
        username: &str,
        status: Option<&str>,
    ) -> Result<EmployeeDashboard, DashboardError> {
        let filter = TaskFilter {
            status: filter_value(status).map(TaskStatus::parse),
            assigned_to: Some(username.to_owned()),
        };

        Ok(EmployeeDashboard {
            tasks: self.tasks.list_tasks(&filter).await?,
            stats: self.tasks.stats(Some(username)).await?,
        })
    }
}
