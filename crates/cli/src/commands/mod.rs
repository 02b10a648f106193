//! CLI command implementations.

pub mod accounts;
pub mod migrate;

use taskdesk_web::config::get_database_url;
use taskdesk_web::db;

/// Connect to the database named by `TASKDESK_DATABASE_URL`.
pub async fn connect() -> Result<sqlx::PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("TASKDESK_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
