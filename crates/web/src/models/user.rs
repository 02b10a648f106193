//! User domain types.
//!
//! The stored password hash is deliberately not part of [`User`]; it only
//! travels through the credential lookup in the user store.

use chrono::{DateTime, Utc};

use taskdesk_core::{Role, UserId};

/// An account (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all accounts.
    pub username: String,
    /// Contact address. Stored as entered.
    pub email: String,
    /// Display name shown in the UI and on comments.
    pub full_name: String,
    /// Permission level.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
