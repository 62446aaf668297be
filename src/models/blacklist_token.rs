//! Blacklisted token model for session revocation.
//!
//! Logout does not delete anything client-side; it records the token's
//! `jti` here and the auth middleware refuses it from then on.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a row in the `token_blacklist` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlacklistToken {
    /// The `jti` claim of the revoked JWT
    pub jti: Uuid,

    /// Whether the token is revoked
    ///
    /// Kept as an explicit flag rather than inferring from row presence,
    /// which leaves room for un-revoking a token administratively.
    pub revoked: bool,

    /// Timestamp when the token was blacklisted
    pub created_at: DateTime<Utc>,
}
