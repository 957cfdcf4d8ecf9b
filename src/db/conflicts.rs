use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::cache::RiskScoreSource;
use crate::db::Db;
use crate::error::Result;
use crate::models::{match_key, ConflictRecord, NewConflictRecord, PageParams};

const CONFLICT_COLUMNS: &str =
    "id, country, admin1, population, events, risk_score, created_at, updated_at";

/// Insert a conflict row and return its id
///
/// Fails with a unique violation if a row with the same country and admin1
/// (compared by `match_key`) already exists.
pub async fn insert_conflict(pool: &Db, record: &NewConflictRecord) -> Result<i64> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO conflict_data \
         (country, admin1, country_key, admin1_key, population, events, risk_score, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.country)
    .bind(&record.admin1)
    .bind(match_key(&record.country))
    .bind(match_key(&record.admin1))
    .bind(record.population)
    .bind(record.events)
    .bind(record.risk_score)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Append `WHERE country_key IN (?, ...)` when a filter is given
fn push_country_filter(builder: &mut QueryBuilder<'_, Sqlite>, countries: &[String]) {
    if countries.is_empty() {
        return;
    }

    builder.push(" WHERE country_key IN (");
    let mut separated = builder.separated(", ");
    for country in countries {
        separated.push_bind(match_key(country));
    }
    separated.push_unseparated(")");
}

/// Count rows, optionally restricted to a set of countries (case-insensitive)
pub async fn count_conflicts(pool: &Db, countries: &[String]) -> Result<i64> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM conflict_data");
    push_country_filter(&mut builder, countries);

    let count = builder.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(count)
}

/// One page of rows ordered by folded country, then folded admin1
///
/// The ordering is total because (country_key, admin1_key) is unique,
/// so repeated calls with the same parameters return the same rows.
pub async fn list_page(
    pool: &Db,
    countries: &[String],
    page: PageParams,
) -> Result<Vec<ConflictRecord>> {
    let mut builder =
        QueryBuilder::<Sqlite>::new(format!("SELECT {CONFLICT_COLUMNS} FROM conflict_data"));
    push_country_filter(&mut builder, countries);
    builder
        .push(" ORDER BY country_key, admin1_key LIMIT ")
        .push_bind(page.page_size)
        .push(" OFFSET ")
        .push_bind(page.offset);

    let rows = builder
        .build_query_as::<ConflictRecord>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Number of rows for one country (case-insensitive)
pub async fn count_by_country(pool: &Db, country: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM conflict_data WHERE country_key = ?",
    )
    .bind(match_key(country))
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Rows for one country (case-insensitive), at most `limit`, ordered by admin1
pub async fn list_by_country(pool: &Db, country: &str, limit: i64) -> Result<Vec<ConflictRecord>> {
    let rows = sqlx::query_as::<_, ConflictRecord>(&format!(
        "SELECT {CONFLICT_COLUMNS} FROM conflict_data \
         WHERE country_key = ? ORDER BY admin1_key LIMIT ?"
    ))
    .bind(match_key(country))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Whether any row matches the country (case-insensitive)
pub async fn country_exists(pool: &Db, country: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM conflict_data WHERE country_key = ?)",
    )
    .bind(match_key(country))
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// `AVG(risk_score)` over a country's rows; `None` when no rows match
pub async fn average_risk_score(pool: &Db, country: &str) -> Result<Option<f64>> {
    let average = sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(risk_score) FROM conflict_data WHERE country_key = ?",
    )
    .bind(match_key(country))
    .fetch_one(pool)
    .await?;
    Ok(average)
}

/// Rows whose admin1 matches, optionally narrowed by country (both
/// case-insensitive), ordered by country
pub async fn find_by_region(
    pool: &Db,
    admin1: &str,
    country: Option<&str>,
) -> Result<Vec<ConflictRecord>> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {CONFLICT_COLUMNS} FROM conflict_data WHERE admin1_key = "
    ));
    builder.push_bind(match_key(admin1));
    if let Some(country) = country {
        builder.push(" AND country_key = ").push_bind(match_key(country));
    }
    builder.push(" ORDER BY country_key");

    let rows = builder
        .build_query_as::<ConflictRecord>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Delete the row matching admin1 and country (case-insensitive)
///
/// Runs in one transaction so the row that is looked up is the row that is
/// deleted. Feedback rows go with it through the cascading foreign key.
/// Returns the deleted row, or `None` if nothing matched.
pub async fn delete_by_region(
    pool: &Db,
    admin1: &str,
    country: &str,
) -> Result<Option<ConflictRecord>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ConflictRecord>(&format!(
        "SELECT {CONFLICT_COLUMNS} FROM conflict_data \
         WHERE admin1_key = ? AND country_key = ? \
         ORDER BY id LIMIT 1"
    ))
    .bind(match_key(admin1))
    .bind(match_key(country))
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query("DELETE FROM conflict_data WHERE id = ?")
        .bind(row.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Some(row))
}

impl RiskScoreSource for Db {
    async fn country_exists(&self, country: &str) -> Result<bool> {
        country_exists(self, country).await
    }

    async fn average_risk_score(&self, country: &str) -> Result<Option<f64>> {
        average_risk_score(self, country).await
    }
}
