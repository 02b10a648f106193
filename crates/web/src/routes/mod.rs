//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (store ping)
//! GET  /static/*                 - Static assets
//!
//! # Auth
//! GET  /                         - Dashboard redirect or login page
//! GET  /login                    - Login page
//! POST /login                    - Authenticate
//! GET  /logout                   - Clear session
//!
//! # Admin
//! GET  /admin/dashboard          - All tasks (?status=&employee=), global stats
//! GET  /admin/employees          - Employee list
//! POST /admin/add_employee       - Create employee
//! GET  /admin/add_task           - Task form
//! POST /admin/add_task           - Create task
//! GET  /delete_employee/{id}     - Delete employee
//!
//! # Employee
//! GET  /employee/dashboard       - Own tasks (?status=), own stats
//!
//! # Any signed-in user
//! GET  /task/{id}                - Task detail
//! POST /update_task_status       - Set status
//! POST /add_comment              - Append comment
//! ```

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod tasks;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::service::SignedCookie;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;

/// Directory holding the CSS and other static assets.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/admin/dashboard", get(dashboard::admin_dashboard))
        .route("/admin/employees", get(employees::manage_employees))
        .route("/admin/add_employee", post(employees::add_employee))
        .route(
            "/admin/add_task",
            get(tasks::add_task_page).post(tasks::add_task),
        )
        .route("/delete_employee/{id}", get(employees::delete_employee))
        .route("/employee/dashboard", get(dashboard::employee_dashboard))
        .route("/task/{id}", get(tasks::task_detail))
        .route("/update_task_status", post(tasks::update_task_status))
        .route("/add_comment", post(tasks::add_comment))
}

/// The full application: pages, health probes, static files, and sessions.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S, SignedCookie>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes().layer(session_layer))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
}
