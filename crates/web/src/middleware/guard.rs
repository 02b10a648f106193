//! Role-based access guard.
//!
//! Pure predicates over the session identity. The extractors in
//! [`super::auth`] load the identity and delegate here.

use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use taskdesk_core::Role;

use crate::models::CurrentUser;

/// Where denied requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No identity in the session.
    #[error("not signed in")]
    Unauthenticated,

    /// Signed in, but with a role outside the permitted set.
    #[error("role {actual} may not access this page")]
    Unauthorized {
        required: Vec<Role>,
        actual: Role,
    },
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Access denied");
        Redirect::to(LOGIN_PATH).into_response()
    }
}

/// Allow iff an identity exists and its role is one of `roles`.
///
/// # Errors
///
/// Returns `AccessDenied::Unauthenticated` without an identity, or
/// `AccessDenied::Unauthorized` when the role is not permitted.
pub fn require_role<'a>(
    user: Option<&'a CurrentUser>,
    roles: &[Role],
) -> Result<&'a CurrentUser, AccessDenied> {
    let user = require_authenticated(user)?;
    if roles.contains(&user.role) {
        Ok(user)
    } else {
        Err(AccessDenied::Unauthorized {
            required: roles.to_vec(),
            actual: user.role,
        })
    }
}

/// Allow iff an identity exists, whatever its role.
///
/// # Errors
///
/// Returns `AccessDenied::Unauthenticated` without an identity.
pub const fn require_authenticated(
    user: Option<&CurrentUser>,
) -> Result<&CurrentUser, AccessDenied> {
    match user {
        Some(user) => Ok(user),
        None => Err(AccessDenied::Unauthenticated),
    }
}
