//! HTTP middleware and request extractors.
//!
//! # Layer order (outermost first, see `main.rs`)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (signed cookie, `PostgreSQL` or memory store)
//!
//! Access control is per handler, through the extractors in [`auth`].

pub mod auth;
pub mod flash;
pub mod guard;
pub mod session;

pub use auth::{OptionalAuth, RequireAdmin, RequireAuth, RequireEmployee, set_current_user};
pub use flash::{push_flash, take_flashes};
pub use guard::{AccessDenied, require_authenticated, require_role};
pub use session::{
    SESSION_COOKIE_NAME, SessionLayerError, create_session_layer, postgres_session_store,
};
