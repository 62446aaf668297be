//! Authentication HTTP handlers.
//!
//! This module implements the account endpoints:
//! - POST /api/v1/register - Create a new user account
//! - POST /api/v1/login - Verify credentials and issue an access token
//! - POST /api/v1/logout - Revoke the presented token

use crate::{
    AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{LoginRequest, RegisterRequest, User},
    services::{password, token},
    validate,
};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

/// Register a new user account.
///
/// # Endpoint
///
/// `POST /api/v1/register`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "username": "jane",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": "Account created successfully"}`
/// - **Error (400)**: Body is not JSON, or the email is malformed
/// - **Error (422)**: Missing or blank fields, one message per field
/// - **Error (409)**: Email already registered
///
/// # Validation Order
///
/// Presence first, then email format. Uniqueness is enforced by the
/// unique index on `users.email` alone: the insert's unique-violation
/// error maps to 409, so two concurrent registers cannot both win and
/// the loser sees the same response as a sequential duplicate.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;

    validate::require_fields(&[
        ("email", request.email.as_deref()),
        ("username", request.username.as_deref()),
        ("password", request.password.as_deref()),
    ])?;

    // require_fields guarantees all three are present and non-blank
    let email = request.email.as_deref().unwrap_or_default().trim();
    let username = request.username.as_deref().unwrap_or_default().trim();
    let password_plain = request.password.as_deref().unwrap_or_default();

    if !validate::validate_email(email) {
        return Err(AppError::InvalidEmail);
    }

    let password_hash =
        password::hash_password(password_plain).map_err(|e| AppError::Internal(e.to_string()))?;

    sqlx::query("INSERT INTO users (email, username, password_hash) VALUES ($1, $2, $3)")
        .bind(email)
        .bind(username)
        .bind(&password_hash)
        .execute(&state.pool)
        .await
        .map_err(|err| {
            // A duplicate email trips the unique index; everything else
            // is a real database failure
            if err
                .as_database_error()
                .is_some_and(|e| e.is_unique_violation())
            {
                AppError::UserExists
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(email, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Account created successfully" })),
    ))
}

/// Log a user in and issue a bearer token.
///
/// # Endpoint
///
/// `POST /api/v1/login`
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com", "password": "hunter2hunter2" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**:
///   `{"message": "Login successful", "access_token": "<jwt>"}`
/// - **Error (400/422)**: Malformed body or missing fields
/// - **Error (401)**: Unknown email or wrong password, indistinguishable
///   by design
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;

    validate::require_fields(&[
        ("email", request.email.as_deref()),
        ("password", request.password.as_deref()),
    ])?;

    let email = request.email.as_deref().unwrap_or_default().trim();
    let password_plain = request.password.as_deref().unwrap_or_default();

    if !validate::validate_email(email) {
        return Err(AppError::InvalidEmail);
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, username, password_hash, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(password_plain, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let access_token = token::create_access_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "message": "Login successful",
        "access_token": access_token,
    })))
}

/// Log the caller out by revoking the presented token.
///
/// # Endpoint
///
/// `POST /api/v1/logout` (authenticated)
///
/// Inserts the token's `jti` into the blacklist; the auth middleware
/// rejects it from the next request onward. Other tokens the user holds
/// stay valid. Idempotent: logging out twice with a fresh token of the
/// same session upserts the same row.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    sqlx::query(
        "INSERT INTO token_blacklist (jti, revoked) VALUES ($1, TRUE)
         ON CONFLICT (jti) DO UPDATE SET revoked = TRUE",
    )
    .bind(auth.jti)
    .execute(&state.pool)
    .await?;

    tracing::info!(user_id = %auth.user_id, "user logged out");

    Ok(Json(json!({ "message": "Logout successful" })))
}
