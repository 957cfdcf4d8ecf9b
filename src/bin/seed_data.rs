//! Reset the database and load demo data.
//!
//! Usage: `seed_data <records.json>`
//!
//! The file holds an array of `{country, admin1, population, events, score}`
//! objects. Two demo accounts are created afterwards: `user1@test.com` and the
//! admin `user2@test.com`, both with the password from SEED_PASSWORD.

use std::env;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conflict_data_api::constants::DEFAULT_DATABASE_PATH;
use conflict_data_api::seed::{self, SeedRecord};
use conflict_data_api::{create_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conflict_data_api=info,seed_data=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let records_path = env::args()
        .nth(1)
        .context("usage: seed_data <records.json>")?;
    let database_path =
        env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
    let password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "password123".to_string());

    let raw = std::fs::read_to_string(&records_path)
        .with_context(|| format!("reading {}", records_path))?;
    let records: Vec<SeedRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", records_path))?;

    let pool = create_pool(&database_path).await?;
    run_migrations(&pool).await?;

    tracing::info!("Clearing existing data in {}", database_path);
    seed::clear_tables(&pool).await?;

    seed::load_conflicts(&pool, records).await?;
    seed::create_user(&pool, "user1@test.com", &password, false).await?;
    seed::create_user(&pool, "user2@test.com", &password, true).await?;

    tracing::info!("Demo data load complete");
    Ok(())
}
