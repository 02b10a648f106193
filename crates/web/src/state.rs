//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{MemoryStore, PgTaskRepository, PgUserRepository, TaskStore, UserStore};
use crate::services::{CredentialService, DashboardQueries, SecretHasher, TaskService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out the services
/// that sit on top of the configured stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
    tasks: Arc<dyn TaskStore>,
    hasher: SecretHasher,
}

impl AppState {
    /// Create state over explicit stores.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>, hasher: SecretHasher) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                tasks,
                hasher,
            }),
        }
    }

    /// Create state backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            SecretHasher::new(),
        )
    }

    /// Create state backed by a single in-memory store.
    #[must_use]
    pub fn in_memory(store: MemoryStore, hasher: SecretHasher) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store), hasher)
    }

    /// Get the account store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get the task store.
    #[must_use]
    pub fn tasks(&self) -> &dyn TaskStore {
        self.inner.tasks.as_ref()
    }

    /// Credential service over the account store.
    #[must_use]
    pub fn credentials(&self) -> CredentialService<'_> {
        CredentialService::new(self.users(), &self.inner.hasher)
    }

    /// Task service over the task store.
    #[must_use]
    pub fn task_service(&self) -> TaskService<'_> {
        TaskService::new(self.tasks())
    }

    /// Dashboard queries over both stores.
    #[must_use]
    pub fn dashboards(&self) -> DashboardQueries<'_> {
        DashboardQueries::new(self.task_service(), self.credentials())
    }
}
