//! Core services shared by the HTTP handlers.

/// Argon2id password hashing and verification
pub mod password;
/// JWT access token creation and validation
pub mod token;
