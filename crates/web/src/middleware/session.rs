//! Session layer configuration.
//!
//! Signed cookies (`taskdesk_session`, HttpOnly, SameSite=Lax, 24h inactivity
//! expiry) over any tower-sessions store: `PostgreSQL` in production, memory
//! in tests and local development.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "taskdesk_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Errors that can occur while building the session layer.
#[derive(Debug, Error)]
pub enum SessionLayerError {
    /// The secret cannot be turned into a signing key.
    #[error("invalid session secret: {0}")]
    InvalidSecret(String),

    /// The session table could not be set up.
    #[error("session store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Create the session layer over the given store.
///
/// # Arguments
///
/// * `store` - Session store (`PostgresStore` or `MemoryStore`)
/// * `secret` - Cookie signing secret, at least 64 bytes
/// * `secure` - Whether to mark the cookie `Secure` (HTTPS deployments)
///
/// # Errors
///
/// Returns `SessionLayerError::InvalidSecret` if the secret is too short.
pub fn create_session_layer<S>(
    store: S,
    secret: &SecretString,
    secure: bool,
) -> Result<SessionManagerLayer<S, SignedCookie>, SessionLayerError>
where
    S: SessionStore + Clone,
{
    let key = Key::try_from(secret.expose_secret().as_bytes())
        .map_err(|e| SessionLayerError::InvalidSecret(e.to_string()))?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}

/// Create the `PostgreSQL` session store and its table.
///
/// # Errors
///
/// Returns `SessionLayerError::Store` if the schema or table cannot be created.
pub async fn postgres_session_store(pool: &PgPool) -> Result<PostgresStore, SessionLayerError> {
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}
