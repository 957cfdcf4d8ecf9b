//! Bearer-token extractors and the admin gate.

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

use crate::db::users;
use crate::error::{AppError, AuthFailure, Result};
use crate::models::User;
use crate::security::validate_token;
use crate::AppState;

/// Authenticated caller; present in a handler means the token checked out
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Authenticated caller with the admin flag set
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`
///
/// Anything else (no header, another scheme, empty or space-containing token)
/// counts as a missing credential.
pub fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, AuthFailure> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthFailure::MissingCredential)?;

    if token.is_empty() || token.contains(' ') {
        return Err(AuthFailure::MissingCredential);
    }
    Ok(token)
}

fn deny(reason: AuthFailure) -> AppError {
    tracing::warn!("Authentication denied: {:?}", reason);
    AppError::Unauthenticated(reason)
}

/// Resolve the request's bearer token to a stored user
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User> {
    let token = bearer_token(headers).map_err(deny)?;

    let user_id = validate_token(token, &state.config.secret_key)
        .map_err(|_| deny(AuthFailure::InvalidCredential))?;

    users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| deny(AuthFailure::UnknownSubject))
}

/// Pass the user through only if they are an admin
pub fn require_admin(user: User) -> Result<User> {
    if !user.is_admin {
        tracing::warn!("Admin privileges required, denied user {}", user.id);
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await.map(AuthUser)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let user = authenticate(state, &parts.headers).await?;
        require_admin(user).map(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn user(is_admin: bool) -> User {
        User {
            id: 1,
            email: "user1@apitest.com".to_string(),
            hashed_password: String::new(),
            is_admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthFailure::MissingCredential)
        );
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        for value in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearer", "Bearer ", "Token abc"] {
            assert_eq!(
                bearer_token(&headers_with(value)),
                Err(AuthFailure::MissingCredential),
                "accepted {value:?}"
            );
        }
    }

    #[test]
    fn test_bearer_token_extra_parts() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc def")),
            Err(AuthFailure::MissingCredential)
        );
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(user(true)).is_ok());
        assert!(matches!(require_admin(user(false)), Err(AppError::Forbidden)));
    }
}
