//! Credential service.
//!
//! Username/password authentication and account management on top of a
//! [`UserStore`]. Passwords are stored only as Argon2id hashes.

mod error;
mod password;

pub use error::AuthError;
pub use password::SecretHasher;

use chrono::Utc;
use tracing::{info, warn};

use taskdesk_core::{Role, UserId};

use crate::db::{RepositoryError, UserStore};
use crate::models::User;

/// Username of the bootstrap administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password of the bootstrap administrator unless configured otherwise.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_EMAIL: &str = "admin@company.com";
const DEFAULT_ADMIN_NAME: &str = "System Administrator";

/// Fields for a new employee account.
#[derive(Debug, Clone)]
pub struct NewEmployee<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub password: &'a str,
}

/// Credential service.
///
/// Handles login verification, employee account creation and deletion, and
/// bootstrap seeding of the default admin.
pub struct CredentialService<'a> {
    users: &'a dyn UserStore,
    hasher: &'a SecretHasher,
}

impl<'a> CredentialService<'a> {
    /// Create a new credential service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, hasher: &'a SecretHasher) -> Self {
        Self { users, hasher }
    }

    /// Verify a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password does not match.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, hash) = self
            .users
            .find_credentials(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Create an employee account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn create_employee(&self, new: &NewEmployee<'_>) -> Result<User, AuthError> {
        self.create_user(new, Role::Employee).await
    }

    async fn create_user(&self, new: &NewEmployee<'_>, role: Role) -> Result<User, AuthError> {
        let password_hash = self.hasher.hash(new.password)?;
        let user = User {
            id: UserId::generate(),
            username: new.username.to_owned(),
            email: new.email.to_owned(),
            full_name: new.full_name.to_owned(),
            role,
            created_at: Utc::now(),
        };

        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        info!(username = %user.username, role = %role, "Account created");
        Ok(user)
    }

    /// Delete an account. Deleting an absent account is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn delete_user(&self, id: UserId) -> Result<(), AuthError> {
        if self.users.delete(id).await? {
            info!(user_id = %id, "Account deleted");
        }
        Ok(())
    }

    /// All employee accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the query fails.
    pub async fn list_employees(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.list_by_role(Role::Employee).await?)
    }

    /// Create the default admin if no admin account exists.
    ///
    /// Returns whether an account was created. If the `admin` username is
    /// already held by a non-admin account, nothing is created.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store fails.
    pub async fn ensure_default_admin(&self, password: &str) -> Result<bool, AuthError> {
        if self.users.exists_with_role(Role::Admin).await? {
            return Ok(false);
        }

        let admin = NewEmployee {
            username: DEFAULT_ADMIN_USERNAME,
            email: DEFAULT_ADMIN_EMAIL,
            full_name: DEFAULT_ADMIN_NAME,
            password,
        };
        match self.create_user(&admin, Role::Admin).await {
            Ok(_) => Ok(true),
            Err(AuthError::UserAlreadyExists) => {
                warn!(
                    username = DEFAULT_ADMIN_USERNAME,
                    "Default admin username is taken by a non-admin account; skipping seed"
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn bob() -> NewEmployee<'static> {
        NewEmployee {
            username: "bob",
            email: "bob@company.com",
            full_name: "Bob Builder",
            password: "pw1",
        }
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let service = CredentialService::new(&store, &hasher);
        service.create_employee(&bob()).await.unwrap();

        let user = service.verify_credentials("bob", "pw1").await.unwrap();
        assert_eq!(user.role, Role::Employee);
        assert_eq!(user.full_name, "Bob Builder");

        assert!(matches!(
            service.verify_credentials("bob", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.verify_credentials("nobody", "pw1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let service = CredentialService::new(&store, &hasher);
        service.create_employee(&bob()).await.unwrap();

        let again = NewEmployee {
            password: "other",
            ..bob()
        };
        assert!(matches!(
            service.create_employee(&again).await,
            Err(AuthError::UserAlreadyExists)
        ));
        // Original password still works
        service.verify_credentials("bob", "pw1").await.unwrap();
        assert_eq!(service.list_employees().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let service = CredentialService::new(&store, &hasher);
        let user = service.create_employee(&bob()).await.unwrap();

        service.delete_user(user.id).await.unwrap();
        service.delete_user(user.id).await.unwrap();
        assert!(service.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_default_admin_runs_once() {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let service = CredentialService::new(&store, &hasher);

        assert!(service.ensure_default_admin("admin123").await.unwrap());
        assert!(!service.ensure_default_admin("admin123").await.unwrap());

        let admin = service.verify_credentials("admin", "admin123").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email, "admin@company.com");
        assert_eq!(admin.full_name, "System Administrator");
    }

    #[tokio::test]
    async fn test_ensure_default_admin_skips_taken_username() {
        let store = MemoryStore::new();
        let hasher = SecretHasher::low_cost();
        let service = CredentialService::new(&store, &hasher);
        let squatter = NewEmployee {
            username: "admin",
            ..bob()
        };
        service.create_employee(&squatter).await.unwrap();

        assert!(!service.ensure_default_admin("admin123").await.unwrap());
        assert!(!store.exists_with_role(Role::Admin).await.unwrap());
    }
}
