use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::MAX_EMAIL_CHARS;

/// User row as stored in the users table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Stored exactly as registered; lookups are case-sensitive
    pub email: String,
    /// Argon2 PHC string
    pub hashed_password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user for API responses
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl User {
    /// Shallow email shape check: one `@` with a non-empty local part and a
    /// dotted domain, no whitespace.
    pub fn validate_email(email: &str) -> bool {
        if email.is_empty() || email.len() > MAX_EMAIL_CHARS {
            return false;
        }
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        }
    }
}
