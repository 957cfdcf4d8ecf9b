pub mod conflicts;
pub mod feedback;
pub mod pool;
pub mod users;

pub use pool::{create_pool, Db};

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &Db) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
