//! Integration test harness for Taskdesk.
//!
//! Drives the full router (sessions, guards, handlers, templates) in-process
//! over the in-memory stores. No database or running server is needed.
//!
//! ```bash
//! cargo test -p taskdesk-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::cookie::Cookie;
use tower_sessions::cookie::time::Duration;

use taskdesk_core::{Role, TaskId};
use taskdesk_web::db::{MemoryStore, TaskStore, UserStore};
use taskdesk_web::middleware::{SESSION_COOKIE_NAME, create_session_layer};
use taskdesk_web::models::{NewTask, Task, TaskFilter, User};
use taskdesk_web::services::{CredentialService, NewEmployee, SecretHasher, TaskService};
use taskdesk_web::{AppState, app};

/// Password of the seeded admin in every test context.
pub const ADMIN_PASSWORD: &str = "admin123";

const TEST_SECRET: &str =
    "q9Zt4Lw2Xk7Vb1Nc8Md3Pf6Rg0Hj5Sa2Ue7Yi4Oo1Ww9Ee3Rr6Tt8Yy2Uu5Ii0Pp7Aa4Ss1Dd";

/// Response as seen by a test.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert a 303 redirect to `path`.
    pub fn assert_redirect(&self, path: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(path));
    }
}

/// A browser-like client: one app, one store, one cookie.
pub struct TestContext {
    pub app: Router,
    pub store: MemoryStore,
    pub hasher: SecretHasher,
    cookie: Option<String>,
}

impl TestContext {
    /// Fresh app over an empty store with the default admin seeded.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let state = AppState::in_memory(store.clone(), hasher.clone());
        state
            .credentials()
            .ensure_default_admin(ADMIN_PASSWORD)
            .await
            .unwrap();

        let secret = SecretString::from(TEST_SECRET);
        let layer =
            create_session_layer(tower_sessions::MemoryStore::default(), &secret, false).unwrap();

        Self {
            app: app(state, layer),
            store,
            hasher,
            cookie: None,
        }
    }

    /// Another client sharing the same app and store, with no cookie.
    #[must_use]
    pub fn new_client(&self) -> Self {
        Self {
            app: self.app.clone(),
            store: self.store.clone(),
            hasher: self.hasher.clone(),
            cookie: None,
        }
    }

    /// Send a request, carrying and updating the session cookie.
    pub async fn send(&mut self, method: Method, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = if form.is_empty() {
            Body::empty()
        } else {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(encode_form(form))
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            self.absorb_cookie(set_cookie.to_str().unwrap());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET a path.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, &[]).await
    }

    /// POST a form.
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, form).await
    }

    /// Sign in through the login form.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Sign in as the seeded admin.
    pub async fn login_admin(&mut self) {
        self.login("admin", ADMIN_PASSWORD)
            .await
            .assert_redirect("/admin/dashboard");
    }

    /// Whether a session cookie is currently held.
    #[must_use]
    pub const fn has_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    /// Create an employee directly in the store.
    pub async fn seed_employee(&self, username: &str, password: &str) -> User {
        CredentialService::new(&self.store, &self.hasher)
            .create_employee(&NewEmployee {
                username,
                email: &format!("{username}@company.com"),
                full_name: &format!("{username} (full name)"),
                password,
            })
            .await
            .unwrap()
    }

    /// Create a task directly in the store.
    pub async fn seed_task(&self, title: &str, assigned_to: &str) -> TaskId {
        TaskService::new(&self.store)
            .create_task(
                NewTask {
                    title: title.to_owned(),
                    description: format!("{title} description"),
                    assigned_to: assigned_to.to_owned(),
                    priority: "medium".to_owned(),
                    due_date: "2026-12-31".to_owned(),
                },
                "admin",
            )
            .await
            .unwrap()
    }

    /// Read a task straight from the store.
    pub async fn task(&self, id: TaskId) -> Task {
        self.store.get(id).await.unwrap().unwrap()
    }

    /// All tasks, newest first.
    pub async fn tasks(&self) -> Vec<Task> {
        self.store.list(&TaskFilter::all()).await.unwrap()
    }

    /// All employees.
    pub async fn employees(&self) -> Vec<User> {
        self.store.list_by_role(Role::Employee).await.unwrap()
    }

    fn absorb_cookie(&mut self, set_cookie: &str) {
        let Ok(cookie) = Cookie::parse(set_cookie) else {
            return;
        };
        if cookie.name() != SESSION_COOKIE_NAME {
            return;
        }
        let expired = cookie.max_age().is_some_and(|age| age <= Duration::ZERO);
        if cookie.value().is_empty() || expired {
            self.cookie = None;
        } else {
            self.cookie = Some(cookie.stripped().to_string());
        }
    }
}

fn encode_form(form: &[(&str, &str)]) -> String {
    form.iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
