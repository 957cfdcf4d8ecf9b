use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Fixed signing algorithm for access tokens
const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with Argon2id and a random salt
///
/// Returns the PHC string (`$argon2id$v=19$...`) to store alongside the user.
/// Argon2 is deliberately slow; call this from `spawn_blocking` in handlers.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored PHC string
///
/// Returns false on mismatch and on a malformed stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!("Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Access Tokens
// =============================================================================

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Absolute expiry (Unix seconds)
    pub exp: i64,
}

/// Token failed validation. Carries no detail on purpose: callers only learn
/// that the credential is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

/// Issue a signed access token for `user_id` that expires after `ttl`
pub fn issue_token(user_id: i64, ttl: Duration, secret: &str) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify signature and expiry, returning the user id the token was issued for
pub fn validate_token(token: &str, secret: &str) -> std::result::Result<i64, InvalidToken> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Token rejected: {:?}", e.kind());
        InvalidToken
    })?;

    data.claims.sub.parse::<i64>().map_err(|_| InvalidToken)
}
