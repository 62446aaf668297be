//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Request Errors**: Malformed bodies and failed field validation
/// - **Authentication Errors**: Bad credentials or bad/revoked tokens
/// - **Authorization Errors**: Mutations by a non-owner
/// - **Resource Errors**: Requested records not found
/// - **Conflict Errors**: Duplicate registration email
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body was not valid JSON (or was missing entirely).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Bad Request. Request should be JSON format")]
    MalformedJson,

    /// Email did not pass the structural format check.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// One or more required fields were missing or blank.
    ///
    /// Returns HTTP 422 Unprocessable Entity with one message per field.
    #[error("Validation failed")]
    MissingFields(Vec<String>),

    /// Login failed: unknown email or wrong password.
    ///
    /// Returns HTTP 401 Unauthorized. A single variant covers both cases so
    /// responses do not reveal whether the email is registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token was missing, malformed, expired, or revoked.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token decoded but its subject no longer matches a user record.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Please login to continue")]
    LoginRequired,

    /// Password re-confirmation on business delete did not match.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid password")]
    InvalidPassword,

    /// Caller is authenticated but does not own the target business.
    ///
    /// Returns HTTP 403 Forbidden. Also covers mutations against a business
    /// id that does not exist, so callers cannot probe for other ids.
    #[error("The operation is Forbidden")]
    Forbidden,

    /// Requested business does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Business not found")]
    BusinessNotFound,

    /// Registration email is already taken.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("User already exists")]
    UserExists,

    /// Password hashing or token signing failed.
    ///
    /// Returns HTTP 500 Internal Server Error (details logged, not exposed).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Validation failures additionally carry a `fields` array with one
/// "Please enter your {field}" message per offending field.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::MalformedJson => (StatusCode::BAD_REQUEST, "malformed_request", self.to_string()),
            AppError::InvalidEmail => (StatusCode::BAD_REQUEST, "invalid_email", self.to_string()),
            AppError::MissingFields(ref fields) => {
                let body = Json(json!({
                    "error": {
                        "code": "validation_failure",
                        "message": "Validation failed",
                        "fields": fields,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string()),
            AppError::LoginRequired => (StatusCode::UNAUTHORIZED, "login_required", self.to_string()),
            AppError::InvalidPassword => (
                StatusCode::UNAUTHORIZED,
                "invalid_password",
                self.to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::BusinessNotFound => (
                StatusCode::NOT_FOUND,
                "business_not_found",
                self.to_string(),
            ),
            AppError::UserExists => (StatusCode::CONFLICT, "user_exists", self.to_string()),
            AppError::Database(ref err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
