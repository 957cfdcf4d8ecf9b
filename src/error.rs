use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_ADMIN_REQUIRED, ERR_EMAIL_TAKEN, ERR_INVALID_CREDENTIAL, ERR_INVALID_CREDENTIALS,
    ERR_MISSING_CREDENTIAL, ERR_UNKNOWN_SUBJECT,
};
use crate::models::RegionCandidate;

/// Why a request could not be tied to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization: Bearer <token>` header
    MissingCredential,
    /// Token malformed, expired or signed with another key
    InvalidCredential,
    /// Token valid but the user it names is gone
    UnknownSubject,
}

impl AuthFailure {
    pub fn detail(self) -> &'static str {
        match self {
            AuthFailure::MissingCredential => ERR_MISSING_CREDENTIAL,
            AuthFailure::InvalidCredential => ERR_INVALID_CREDENTIAL,
            AuthFailure::UnknownSubject => ERR_UNKNOWN_SUBJECT,
        }
    }
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Ambiguous region: {message}")]
    Ambiguous {
        message: String,
        matches: Vec<RegionCandidate>,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated: {0:?}")]
    Unauthenticated(AuthFailure),

    #[error("Forbidden")]
    Forbidden,
}

// Extractor failures (bad JSON, undecodable path or query) are client input
// errors and use the same `{"detail"}` body as everything else.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::PasswordHash(ref e) => {
                tracing::error!("Password hash error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Token(ref e) => {
                tracing::error!("Token error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::EmailTaken => (StatusCode::BAD_REQUEST, ERR_EMAIL_TAKEN.to_string()),
            AppError::Ambiguous { message, matches } => {
                let body = Json(json!({
                    "detail": message,
                    "matches": matches,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ERR_INVALID_CREDENTIALS.to_string())
            }
            AppError::Unauthenticated(reason) => {
                (StatusCode::UNAUTHORIZED, reason.detail().to_string())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, ERR_ADMIN_REQUIRED.to_string()),
        };

        let body = Json(json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::EmailTaken, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                AppError::Unauthenticated(AuthFailure::MissingCredential),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (
                AppError::Ambiguous {
                    message: "many".into(),
                    matches: vec![],
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_auth_failure_details_are_distinct() {
        let details = [
            AuthFailure::MissingCredential.detail(),
            AuthFailure::InvalidCredential.detail(),
            AuthFailure::UnknownSubject.detail(),
        ];
        assert_ne!(details[0], details[1]);
        assert_ne!(details[1], details[2]);
        assert_ne!(details[0], details[2]);
    }
}
