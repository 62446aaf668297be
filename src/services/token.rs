//! Access token service: JWT creation and validation.
//!
//! Tokens are HS256 JWTs carrying the user id as subject and a fresh `jti`
//! per token. The `jti` is what the logout flow blacklists, so one revoked
//! login does not kill a user's other sessions.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID as a string
    pub sub: String,
    /// Unique token identifier, target of blacklist revocation
    pub jti: Uuid,
    /// Issued at time as Unix timestamp
    pub iat: i64,
    /// Expiration time as Unix timestamp
    pub exp: i64,
}

/// Create a signed access token for a user.
///
/// # Arguments
///
/// * `user_id` - The UUID of the user
/// * `secret` - The secret key used to sign the JWT
/// * `expiry_hours` - Number of hours until the token expires
///
/// # Errors
///
/// Returns an error if JWT encoding fails (e.g., serialization error).
pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate an access token.
///
/// Signature and expiry are both checked; an expired or tampered token
/// is an error. Blacklist revocation is checked separately by the auth
/// middleware, since it needs a database lookup.
pub fn decode_access_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
