//! Task creation, detail, status updates, and comments.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskdesk_core::{TaskId, TaskStatus};

use super::views::{EmployeeView, SelectOption, TaskView, status_update_options};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, RequireAuth, push_flash, take_flashes};
use crate::models::{CurrentUser, Flash, NewTask};
use crate::services::TaskError;
use crate::state::AppState;

const TASK_NOT_FOUND: &str = "Task not found";

/// New task form data.
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub priority: String,
    pub due_date: String,
}

impl From<AddTaskForm> for NewTask {
    fn from(form: AddTaskForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            assigned_to: form.assigned_to,
            priority: form.priority,
            due_date: form.due_date,
        }
    }
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub task_id: String,
    pub status: String,
}

/// Comment form data.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub task_id: String,
    pub comment: String,
}

/// Add task template.
#[derive(Template, WebTemplate)]
#[template(path = "add_task.html")]
pub struct AddTaskTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub employees: Vec<EmployeeView>,
}

/// Task detail template.
#[derive(Template, WebTemplate)]
#[template(path = "task_detail.html")]
pub struct TaskDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub task: TaskView,
    pub status_options: Vec<SelectOption>,
}

fn task_path(id: TaskId) -> String {
    format!("/task/{id}")
}

/// Flash "Task not found" and send the user back to their dashboard.
async fn task_not_found(session: &Session, user: &CurrentUser) -> Result<Response, AppError> {
    push_flash(session, Flash::error(TASK_NOT_FOUND)).await?;
    Ok(Redirect::to(user.role.dashboard_path()).into_response())
}

/// Display the add task form.
pub async fn add_task_page(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<AddTaskTemplate, AppError> {
    let employees = state.credentials().list_employees().await?;

    Ok(AddTaskTemplate {
        current_user: Some(admin),
        flashes: take_flashes(&session).await,
        employees: employees.into_iter().map(Into::into).collect(),
    })
}

/// Create a task.
#[instrument(skip(state, session, admin, form), fields(username = %admin.username))]
pub async fn add_task(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
    Form(form): Form<AddTaskForm>,
) -> Result<Redirect, AppError> {
    state
        .task_service()
        .create_task(form.into(), &admin.username)
        .await?;
    push_flash(&session, Flash::success("Task assigned successfully")).await?;

    Ok(Redirect::to("/admin/dashboard"))
}

/// Show a task with its comments and the update forms.
#[instrument(skip(state, session, user), fields(username = %user.username))]
pub async fn task_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(id) = id.parse::<TaskId>() else {
        return task_not_found(&session, &user).await;
    };

    let task = match state.task_service().get_task(id).await {
        Ok(task) => task,
        Err(TaskError::NotFound) => return task_not_found(&session, &user).await,
        Err(e) => return Err(e.into()),
    };

    let status_options = status_update_options(&task.status);
    Ok(TaskDetailTemplate {
        current_user: Some(user),
        flashes: take_flashes(&session).await,
        task: task.into(),
        status_options,
    }
    .into_response())
}

/// Overwrite a task's status.
#[instrument(skip(state, session, user, form), fields(username = %user.username, task_id = %form.task_id))]
pub async fn update_task_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<UpdateStatusForm>,
) -> Result<Response, AppError> {
    let Ok(id) = form.task_id.parse::<TaskId>() else {
        return task_not_found(&session, &user).await;
    };

    let status = TaskStatus::parse(&form.status);
    match state.task_service().update_status(id, &status).await {
        Ok(()) => {}
        Err(TaskError::NotFound) => return task_not_found(&session, &user).await,
        Err(e) => return Err(e.into()),
    }
    push_flash(&session, Flash::success("Task status updated successfully")).await?;

    Ok(Redirect::to(&task_path(id)).into_response())
}

/// Append a comment authored by the signed-in user.
#[instrument(skip(state, session, user, form), fields(username = %user.username, task_id = %form.task_id))]
pub async fn add_comment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let Ok(id) = form.task_id.parse::<TaskId>() else {
        return task_not_found(&session, &user).await;
    };

    match state
        .task_service()
        .append_comment(id, &user, &form.comment)
        .await
    {
        Ok(()) => {}
        Err(TaskError::NotFound) => return task_not_found(&session, &user).await,
        Err(e) => return Err(e.into()),
    }
    push_flash(&session, Flash::success("Comment added successfully")).await?;

    Ok(Redirect::to(&task_path(id)).into_response())
}
