//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the JWT from the Authorization header
//! 2. Validate its signature and expiry
//! 3. Reject tokens whose `jti` has been blacklisted by logout
//! 4. Load the user record and inject authentication context
//! 5. Reject unauthorized requests with HTTP 401

use crate::{
    AppState,
    error::AppError,
    models::{blacklist_token::BlacklistToken, user::User},
    services::token,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authentication context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated user
    ///
    /// Used for ownership checks and as the owner/author on new records.
    pub user_id: Uuid,

    /// Email of the authenticated user
    pub email: String,

    /// The `jti` claim of the presented token
    ///
    /// The logout handler blacklists exactly this id.
    pub jti: Uuid,
}

/// Bearer token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <jwt>` header from request
/// 2. Decode and validate the JWT (signature + expiry)
/// 3. Query `token_blacklist` for the token's `jti`; revoked tokens are
///    rejected even though they are otherwise valid
/// 4. Load the user named by the `sub` claim; a token for a deleted user
///    gets "Please login to continue"
/// 5. Inject `AuthContext` into request extensions, call next handler
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer eyJhbGciOi...
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidToken)` for missing/bad/expired/revoked tokens
/// - `Err(AppError::LoginRequired)` when the token's user no longer exists
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Extract Authorization header
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    // Step 2: Extract the bearer token
    // Expected format: "Bearer <jwt>"
    let raw_token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;

    // Step 3: Decode and validate the JWT
    let claims = token::decode_access_token(raw_token, &state.config.jwt_secret)
        .map_err(|_| AppError::InvalidToken)?;

    // Step 4: Reject revoked tokens
    let blacklisted = sqlx::query_as::<_, BlacklistToken>(
        "SELECT jti, revoked, created_at FROM token_blacklist WHERE jti = $1",
    )
    .bind(claims.jti)
    .fetch_optional(&state.pool)
    .await?;
    if blacklisted.is_some_and(|entry| entry.revoked) {
        return Err(AppError::InvalidToken);
    }

    // Step 5: Resolve the token subject to a user record
    let user_id: Uuid = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, username, password_hash, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::LoginRequired)?;

    // Step 6: Inject context into request extensions
    // Route handlers can now extract this using Extension<AuthContext>
    let auth_context = AuthContext {
        user_id: user.id,
        email: user.email,
        jti: claims.jti,
    };
    request.extensions_mut().insert(auth_context);

    // Step 7: Call the next middleware/handler
    Ok(next.run(request).await)
}
