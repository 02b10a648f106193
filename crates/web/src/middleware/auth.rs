//! Authentication extractors.
//!
//! Load the [`CurrentUser`] from the session and run it through the
//! [`guard`](super::guard) predicates.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use taskdesk_core::Role;

use super::guard::{AccessDenied, require_authenticated, require_role};
use crate::models::{CurrentUser, session_keys};

/// Read the identity stored in the request's session, if any.
///
/// A missing session layer or an unreadable session both count as signed out.
async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Extractor that requires the admin role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.full_name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts).await;
        require_role(user.as_ref(), &[Role::Admin]).cloned().map(Self)
    }
}

/// Extractor that requires the employee role.
pub struct RequireEmployee(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireEmployee
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts).await;
        require_role(user.as_ref(), &[Role::Employee]).cloned().map(Self)
    }
}

/// Extractor that requires any signed-in user.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts).await;
        require_authenticated(user.as_ref()).cloned().map(Self)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike the `Require*` extractors, this never rejects.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await))
    }
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}
