//! Employee management (admin only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskdesk_core::UserId;

use super::views::EmployeeView;
use crate::error::AppError;
use crate::middleware::{RequireAdmin, push_flash, take_flashes};
use crate::models::{CurrentUser, Flash};
use crate::services::{AuthError, NewEmployee};
use crate::state::AppState;

const EMPLOYEES_PATH: &str = "/admin/employees";

/// New employee form data.
#[derive(Deserialize)]
pub struct AddEmployeeForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl std::fmt::Debug for AddEmployeeForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddEmployeeForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Employee management template.
#[derive(Template, WebTemplate)]
#[template(path = "manage_employees.html")]
pub struct ManageEmployeesTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub employees: Vec<EmployeeView>,
}

/// List employees with the add form.
pub async fn manage_employees(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<ManageEmployeesTemplate, AppError> {
    let employees = state.credentials().list_employees().await?;

    Ok(ManageEmployeesTemplate {
        current_user: Some(admin),
        flashes: take_flashes(&session).await,
        employees: employees.into_iter().map(Into::into).collect(),
    })
}

/// Create an employee account.
#[instrument(skip(state, session, _admin, form), fields(username = %form.username))]
pub async fn add_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Form(form): Form<AddEmployeeForm>,
) -> Result<Redirect, AppError> {
    let new = NewEmployee {
        username: &form.username,
        email: &form.email,
        full_name: &form.full_name,
        password: &form.password,
    };

    let flash = match state.credentials().create_employee(&new).await {
        Ok(_) => Flash::success("Employee added successfully"),
        Err(AuthError::UserAlreadyExists) => Flash::error("Username already exists"),
        Err(e) => return Err(e.into()),
    };
    push_flash(&session, flash).await?;

    Ok(Redirect::to(EMPLOYEES_PATH))
}

/// Delete an account by ID.
///
/// Unknown and malformed IDs are treated as already deleted.
#[instrument(skip(state, session, _admin))]
pub async fn delete_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    if let Ok(id) = id.parse::<UserId>() {
        state.credentials().delete_user(id).await?;
    } else {
        tracing::debug!(%id, "Ignoring malformed user id");
    }
    push_flash(&session, Flash::success("Employee deleted successfully")).await?;

    Ok(Redirect::to(EMPLOYEES_PATH))
}
