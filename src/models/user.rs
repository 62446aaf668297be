//! User data model and API request types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered account
//! - `RegisterRequest` / `LoginRequest`: Request bodies for the auth endpoints

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. Users own businesses and author reviews;
/// both reference `users.id` as a foreign key.
///
/// The struct is never serialized directly to clients, so the password
/// hash cannot leak through a response body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for this user
    pub id: Uuid,

    /// Login email, unique across all users
    pub email: String,

    /// Display name shown on reviews
    pub username: String,

    /// Argon2id PHC string, never the plaintext password
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/register`.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "username": "jane",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// All fields are optional at the serde level so a blank field produces a
/// field-specific validation message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
