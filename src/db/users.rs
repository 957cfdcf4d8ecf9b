use chrono::Utc;

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, hashed_password, is_admin, created_at, updated_at";

/// Insert a new non-admin user
///
/// Returns `EmailTaken` if the email is already registered, including when a
/// concurrent registration wins the race to the unique index.
pub async fn insert_user(pool: &Db, email: &str, hashed_password: &str) -> Result<User> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO users (email, hashed_password, is_admin, created_at, updated_at) \
         VALUES (?, ?, 0, ?, ?)",
    )
    .bind(email)
    .bind(hashed_password)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::EmailTaken,
        other => AppError::Database(other),
    })?;

    Ok(User {
        id: result.last_insert_rowid(),
        email: email.to_string(),
        hashed_password: hashed_password.to_string(),
        is_admin: false,
        created_at: now,
        updated_at: now,
    })
}

/// Look up a user by exact email
pub async fn find_by_email(pool: &Db, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Look up a user by id
pub async fn find_by_id(pool: &Db, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Grant or revoke the admin flag. Returns false if the user does not exist.
pub async fn set_admin(pool: &Db, id: i64, is_admin: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE id = ?")
        .bind(is_admin)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
