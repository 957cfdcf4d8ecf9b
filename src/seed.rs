//! Demo data loading for local development.
//!
//! Used by the `seed-data` binary. Conflict rows are inserted sorted by
//! (country, admin1) so ids come out in listing order.

use serde::Deserialize;

use crate::db::{conflicts, users, Db};
use crate::error::Result;
use crate::models::{match_key, NewConflictRecord, User};
use crate::security::hash_password;

/// One conflict row as it appears in a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub country: String,
    pub admin1: String,
    #[serde(default)]
    pub population: Option<i64>,
    pub events: i64,
    #[serde(alias = "score")]
    pub risk_score: i64,
}

/// Remove every feedback, conflict and user row
pub async fn clear_tables(pool: &Db) -> Result<()> {
    let mut tx = pool.begin().await?;
    for table in ["user_feedback", "conflict_data", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Insert seed rows in (country, admin1) order, returning how many were added
pub async fn load_conflicts(pool: &Db, mut records: Vec<SeedRecord>) -> Result<usize> {
    records.sort_by_cached_key(|r| (match_key(&r.country), match_key(&r.admin1)));

    for record in &records {
        conflicts::insert_conflict(
            pool,
            &NewConflictRecord {
                country: record.country.clone(),
                admin1: record.admin1.clone(),
                population: record.population,
                events: record.events,
                risk_score: record.risk_score,
            },
        )
        .await?;
    }

    tracing::info!("Loaded {} conflict rows", records.len());
    Ok(records.len())
}

/// Register a demo account, promoting it to admin if asked
pub async fn create_user(pool: &Db, email: &str, password: &str, is_admin: bool) -> Result<User> {
    let hashed = hash_password(password)?;
    let mut user = users::insert_user(pool, email, &hashed).await?;

    if is_admin {
        users::set_admin(pool, user.id, true).await?;
        user.is_admin = true;
    }

    tracing::info!("Created demo user {} (admin: {})", user.email, user.is_admin);
    Ok(user)
}
