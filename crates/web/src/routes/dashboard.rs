//! Admin and employee dashboards.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::views::{
    EmployeeView, SelectOption, TaskView, employee_filter_options, status_filter_options,
};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, RequireEmployee, take_flashes};
use crate::models::{CurrentUser, Flash};
use crate::services::TaskStats;
use crate::services::dashboard::FILTER_ALL;
use crate::state::AppState;

/// Query parameters for the admin dashboard.
#[derive(Debug, Deserialize)]
pub struct AdminDashboardQuery {
    pub status: Option<String>,
    pub employee: Option<String>,
}

/// Query parameters for the employee dashboard.
#[derive(Debug, Deserialize)]
pub struct EmployeeDashboardQuery {
    pub status: Option<String>,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub tasks: Vec<TaskView>,
    pub employees: Vec<EmployeeView>,
    pub stats: TaskStats,
    pub status_options: Vec<SelectOption>,
    pub employee_options: Vec<SelectOption>,
}

/// Employee dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "employee_dashboard.html")]
pub struct EmployeeDashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub tasks: Vec<TaskView>,
    pub stats: TaskStats,
    pub status_options: Vec<SelectOption>,
}

/// Filter value echoed back to the page.
fn echoed(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(FILTER_ALL)
}

/// Every task (filtered), every employee, and global statistics.
#[instrument(skip(state, session, admin), fields(username = %admin.username))]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
    Query(query): Query<AdminDashboardQuery>,
) -> Result<AdminDashboardTemplate, AppError> {
    let status = query.status.as_deref();
    let employee = query.employee.as_deref();
    let view = state.dashboards().admin_view(status, employee).await?;

    let employees: Vec<EmployeeView> = view.employees.into_iter().map(Into::into).collect();
    Ok(AdminDashboardTemplate {
        current_user: Some(admin),
        flashes: take_flashes(&session).await,
        tasks: view.tasks.into_iter().map(Into::into).collect(),
        employee_options: employee_filter_options(&employees, echoed(employee)),
        employees,
        stats: view.stats,
        status_options: status_filter_options(echoed(status)),
    })
}

/// The signed-in employee's own tasks and statistics.
#[instrument(skip(state, session, employee), fields(username = %employee.username))]
pub async fn employee_dashboard(
    State(state): State<AppState>,
    RequireEmployee(employee): RequireEmployee,
    session: Session,
    Query(query): Query<EmployeeDashboardQuery>,
) -> Result<EmployeeDashboardTemplate, AppError> {
    let status = query.status.as_deref();
    let view = state
        .dashboards()
        .employee_view(&employee.username, status)
        .await?;

    Ok(EmployeeDashboardTemplate {
        current_user: Some(employee),
        flashes: take_flashes(&session).await,
        tasks: view.tasks.into_iter().map(Into::into).collect(),
        stats: view.stats,
        status_options: status_filter_options(echoed(status)),
    })
}
