//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! taskdesk-cli migrate
//! ```

use taskdesk_web::db;
use taskdesk_web::middleware::postgres_session_store;

/// Apply all pending migrations, then create the session table.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;
    postgres_session_store(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
