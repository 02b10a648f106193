//! Login, logout, and the landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, set_current_user, take_flashes};
use crate::models::{CurrentUser, Flash};
use crate::services::AuthError;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub username: String,
}

/// Landing page: signed-in users go to their dashboard, others see login.
pub async fn index(OptionalAuth(user): OptionalAuth, session: Session) -> Response {
    if let Some(user) = user {
        return Redirect::to(user.role.dashboard_path()).into_response();
    }
    login_page(session).await.into_response()
}

/// Display the login page.
pub async fn login_page(session: Session) -> impl IntoResponse {
    LoginTemplate {
        current_user: None,
        flashes: take_flashes(&session).await,
        username: String::new(),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .credentials()
        .verify_credentials(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            // New session ID on privilege change
            session.cycle_id().await?;
            let current = CurrentUser::from(&user);
            set_current_user(&session, &current).await?;
            set_sentry_user(&current.id.to_string(), &current.username);

            tracing::info!(role = %current.role, "User logged in");
            Ok(Redirect::to(current.role.dashboard_path()).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login failed");
            let mut flashes = take_flashes(&session).await;
            flashes.push(Flash::error("Invalid username or password"));
            Ok(LoginTemplate {
                current_user: None,
                flashes,
                username: form.username,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Clear the session and return to the landing page.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
