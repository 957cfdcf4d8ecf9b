use chrono::Utc;

use crate::db::Db;
use crate::error::Result;

/// Insert a feedback row and return its id
pub async fn insert_feedback(
    pool: &Db,
    user_id: i64,
    conflict_data_id: i64,
    feedback_text: &str,
) -> Result<i64> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO user_feedback (user_id, conflict_data_id, feedback_text, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(conflict_data_id)
    .bind(feedback_text)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
