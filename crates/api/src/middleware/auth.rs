//! # Authentication Module
//!
//! Operator access to the administrative API. Requests carry
//! `Authorization: Bearer <password>`; the password is checked against the
//! Argon2 hash from `ADMIN_PASSWORD_HASH`.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use eyre::Result;
use framed_core::errors::FramedError;

use crate::{ApiState, middleware::error_handling::AppError};

/// Hashes a password using the Argon2 algorithm
///
/// Returns the PHC string (algorithm, parameters, salt and hash) that
/// `ADMIN_PASSWORD_HASH` expects.
///
/// # Example
///
/// ```rust
/// use framed_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("operator password").unwrap();
/// assert!(verify_password(&hashed, "operator password").unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash.
///
/// # Errors
///
/// Fails when the stored hash itself cannot be parsed.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Rejects requests that do not carry the operator password.
///
/// * no hash configured: 403, the administrative API is disabled
/// * missing or wrong bearer token: 401
pub async fn require_operator(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(password_hash) = state.site.admin_password_hash.as_deref() else {
        return Err(AppError(FramedError::Authorization(
            "Administrative access is not configured".to_string(),
        )));
    };

    let Some(password) = bearer_token(&request) else {
        return Err(AppError(FramedError::Authentication(
            "Operator password required".to_string(),
        )));
    };

    if !verify_password(password_hash, password)? {
        tracing::warn!("Rejected administrative request with a wrong password");
        return Err(AppError(FramedError::Authentication(
            "Invalid password".to_string(),
        )));
    }

    Ok(next.run(request).await)
}
