use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{MAX_FEEDBACK_CHARS, MIN_FEEDBACK_CHARS};

/// A user's comment on a single conflict row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    pub conflict_data_id: i64,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Feedback text must be between MIN_FEEDBACK_CHARS and MAX_FEEDBACK_CHARS
    /// characters (not bytes).
    pub fn validate_text(text: &str) -> Result<(), String> {
        let chars = text.chars().count();
        if chars < MIN_FEEDBACK_CHARS || chars > MAX_FEEDBACK_CHARS {
            return Err(format!(
                "feedback_text must be between {} and {} characters",
                MIN_FEEDBACK_CHARS, MAX_FEEDBACK_CHARS
            ));
        }
        Ok(())
    }
}
