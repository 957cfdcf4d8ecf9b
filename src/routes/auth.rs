use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::constants::MIN_PASSWORD_CHARS;
use crate::db::users;
use crate::error::{AppError, Result};
use crate::models::{User, UserProfile};
use crate::security::{hash_password, issue_token, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Register a new user
///
/// New accounts are never admins. Returns 400 if the email is already taken.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let Json(payload) = payload?;
    let email = payload.email.trim().to_string();
    if !User::validate_email(&email) {
        return Err(AppError::InvalidInput("Invalid email address".to_string()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }

    if users::find_by_email(&state.pool, &email).await?.is_some() {
        tracing::info!("Registration attempt for existing email");
        return Err(AppError::EmailTaken);
    }

    // Argon2 is CPU-bound; keep it off the async workers
    let password = payload.password;
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let user = users::insert_user(&state.pool, &email, &hashed).await?;
    tracing::info!("New user registered: id {}", user.id);

    Ok(Json(UserProfile::from(&user)))
}

/// Exchange email and password for a bearer token
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let user = users::find_by_email(&state.pool, payload.email.trim()).await?;

    let Some(user) = user else {
        tracing::warn!("Login failed");
        return Err(AppError::InvalidCredentials);
    };

    let stored_hash = user.hashed_password.clone();
    let password = payload.password;
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;

    if !verified {
        tracing::warn!("Login failed");
        return Err(AppError::InvalidCredentials);
    }

    let access_token = issue_token(user.id, state.config.token_ttl(), &state.config.secret_key)?;
    tracing::info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// Identity behind the presented token
pub async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}
