//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Username/password credentials and account management
//! - `tasks` - Task creation, status updates, comments, statistics
//! - `dashboard` - Read-side queries for the two dashboards

pub mod auth;
pub mod dashboard;
pub mod tasks;

pub use auth::{AuthError, CredentialService, NewEmployee, SecretHasher};
pub use dashboard::{AdminDashboard, DashboardError, DashboardQueries, EmployeeDashboard};
pub use tasks::{TaskError, TaskService, TaskStats};
