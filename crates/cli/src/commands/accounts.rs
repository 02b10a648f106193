//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! taskdesk-cli admin seed
//! taskdesk-cli employee create -u bob -e bob@company.com -n "Bob Builder" -p 'pw'
//! ```

use thiserror::Error;

use taskdesk_web::db::PgUserRepository;
use taskdesk_web::services::auth::{
    AuthError, CredentialService, DEFAULT_ADMIN_PASSWORD, NewEmployee, SecretHasher,
};

/// Errors that can occur during account commands.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Username is already taken.
    #[error("An account already exists with username: {0}")]
    UserExists(String),

    /// Credential service failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create the default admin if no admin account exists.
pub async fn seed_admin(password: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let users = PgUserRepository::new(pool);
    let hasher = SecretHasher::new();

    let password = password
        .or_else(|| std::env::var("TASKDESK_DEFAULT_ADMIN_PASSWORD").ok())
        .unwrap_or_else(|| {
            tracing::warn!("No password given; using the well-known default");
            DEFAULT_ADMIN_PASSWORD.to_owned()
        });

    let created = CredentialService::new(&users, &hasher)
        .ensure_default_admin(&password)
        .await
        .map_err(AccountError::from)?;

    if created {
        tracing::info!("Default admin created (username: admin)");
    } else {
        tracing::info!("An admin already exists; nothing to do");
    }
    Ok(())
}

/// Create an employee account.
pub async fn create_employee(
    username: &str,
    email: &str,
    full_name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let users = PgUserRepository::new(pool);
    let hasher = SecretHasher::new();

    let new = NewEmployee {
        username,
        email,
        full_name,
        password,
    };
    let user = CredentialService::new(&users, &hasher)
        .create_employee(&new)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AccountError::UserExists(username.to_owned()),
            other => AccountError::Auth(other),
        })?;

    tracing::info!("Employee created: {} ({})", user.username, user.id);
    Ok(())
}
