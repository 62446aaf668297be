//! Business listing HTTP handlers.
//!
//! This module implements the business CRUD endpoints:
//! - POST /api/v1/business - Register a new business (auth)
//! - PUT /api/v1/business/{id} - Update a business (auth, owner only)
//! - DELETE /api/v1/business/{id} - Delete a business (auth, owner, password)
//! - GET /api/v1/business - Paginated list of all businesses
//! - GET /api/v1/business/{id} - Fetch one business

use crate::{
    AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::business::{
        Business, BusinessPayload, BusinessResponse, DeleteBusinessRequest, PageParams,
    },
    services::password,
    validate,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Validate a create/update payload and return the four trimmed fields.
///
/// Name gets its inner whitespace collapsed as well, so search is not
/// defeated by double spaces.
fn validated_fields(
    payload: &BusinessPayload,
) -> Result<(String, String, String, String), AppError> {
    validate::require_fields(&[
        ("name", payload.name.as_deref()),
        ("description", payload.description.as_deref()),
        ("category", payload.category.as_deref()),
        ("location", payload.location.as_deref()),
    ])?;

    Ok((
        validate::normalize_spaces(payload.name.as_deref().unwrap_or_default()),
        payload
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        payload
            .category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        payload
            .location
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
    ))
}

/// Fetch a business and check the caller owns it.
///
/// Both "no such business" and "someone else's business" come back as
/// `Forbidden`, so mutation endpoints cannot be used to probe which ids
/// exist.
async fn owned_business(
    state: &AppState,
    business_id: Uuid,
    owner_id: Uuid,
) -> Result<Business, AppError> {
    let business = sqlx::query_as::<_, Business>(
        "SELECT id, user_id, name, description, category, location, created_at, updated_at
         FROM businesses
         WHERE id = $1",
    )
    .bind(business_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::Forbidden)?;

    if business.user_id != owner_id {
        return Err(AppError::Forbidden);
    }
    Ok(business)
}

/// Register a new business.
///
/// # Endpoint
///
/// `POST /api/v1/business`
///
/// # Authentication
///
/// Requires a valid bearer token; the caller becomes the owner.
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": ..., "business": {...}}`
/// - **Error (422)**: Missing or blank fields
/// - **Error (401)**: Missing or invalid token
pub async fn create_business(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<BusinessPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;
    let (name, description, category, location) = validated_fields(&request)?;

    let business = sqlx::query_as::<_, Business>(
        r#"
        INSERT INTO businesses (user_id, name, description, category, location)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, name, description, category, location, created_at, updated_at
        "#,
    )
    // Owner is always the authenticated caller
    .bind(auth.user_id)
    .bind(&name)
    .bind(&description)
    .bind(&category)
    .bind(&location)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(business_id = %business.id, owner = %auth.user_id, "business created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Business created successfully",
            "business": BusinessResponse::from(business),
        })),
    ))
}

/// Update an existing business.
///
/// # Endpoint
///
/// `PUT /api/v1/business/{id}`
///
/// # Authorization
///
/// Only the owner may update. A missing business and a business owned by
/// someone else both return 403.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": ..., "business": {...}}`
/// - **Error (403)**: Not the owner (or no such business)
/// - **Error (422)**: Missing or blank fields
pub async fn update_business(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(business_id): Path<Uuid>,
    payload: Result<Json<BusinessPayload>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;
    let (name, description, category, location) = validated_fields(&request)?;

    // Ownership check before any write
    owned_business(&state, business_id, auth.user_id).await?;

    let business = sqlx::query_as::<_, Business>(
        r#"
        UPDATE businesses
        SET name = $1,
            description = $2,
            category = $3,
            location = $4,
            updated_at = NOW()
        WHERE id = $5
        RETURNING id, user_id, name, description, category, location, created_at, updated_at
        "#,
    )
    .bind(&name)
    .bind(&description)
    .bind(&category)
    .bind(&location)
    .bind(business_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(json!({
        "message": "Business updated successfully",
        "business": BusinessResponse::from(business),
    })))
}

/// Delete a business.
///
/// # Endpoint
///
/// `DELETE /api/v1/business/{id}`
///
/// # Authorization
///
/// The owner must re-confirm their password in the request body:
///
/// ```json
/// { "password": "hunter2hunter2" }
/// ```
///
/// The password is verified before the business is even looked up, so a
/// caller with a stolen token learns nothing about which ids exist until
/// they also know the password.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Business deleted successfully"}`
/// - **Error (422)**: Missing password field
/// - **Error (401)**: Wrong password
/// - **Error (403)**: Not the owner (or no such business)
pub async fn delete_business(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(business_id): Path<Uuid>,
    payload: Result<Json<DeleteBusinessRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;

    validate::require_fields(&[("password", request.password.as_deref())])?;
    let password_plain = request.password.as_deref().unwrap_or_default();

    // Re-confirm the caller's password against their stored hash
    let password_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_one(&state.pool)
        .await?;
    if !password::verify_password(password_plain, &password_hash) {
        return Err(AppError::InvalidPassword);
    }

    owned_business(&state, business_id, auth.user_id).await?;

    // Reviews go with the business via ON DELETE CASCADE
    sqlx::query("DELETE FROM businesses WHERE id = $1")
        .bind(business_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(business_id = %business_id, owner = %auth.user_id, "business deleted");

    Ok(Json(json!({ "message": "Business deleted successfully" })))
}

/// List all businesses, paginated.
///
/// # Endpoint
///
/// `GET /api/v1/business?page=&limit=` (public)
///
/// # Response
///
/// - **Success (200 OK)** with results:
///   `{"businesses": [...], "next_page": true}`
/// - **Success (200 OK)** with an empty directory:
///   `{"message": "No businesses found"}`
///
/// # Ordering
///
/// Newest first. `next_page` is computed by over-fetching one row past
/// the requested limit, which avoids a separate COUNT query.
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Value>, AppError> {
    let limit = params.capped_limit();

    let mut businesses = sqlx::query_as::<_, Business>(
        r#"
        SELECT id, user_id, name, description, category, location, created_at, updated_at
        FROM businesses
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    // One extra row tells us whether a next page exists
    .bind(limit + 1)
    .bind(params.offset())
    .fetch_all(&state.pool)
    .await?;

    // Empty first page means there is nothing in the directory at all
    if businesses.is_empty() && params.page <= 1 {
        return Ok(Json(json!({ "message": "No businesses found" })));
    }

    let next_page = businesses.len() as i64 > limit;
    businesses.truncate(limit as usize);

    let responses: Vec<BusinessResponse> = businesses.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "businesses": responses,
        "next_page": next_page,
    })))
}

/// Fetch a single business by id.
///
/// # Endpoint
///
/// `GET /api/v1/business/{id}` (public)
///
/// # Response
///
/// - **Success (200 OK)**: the business record
/// - **Error (404)**: No such business
pub async fn get_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> Result<Json<BusinessResponse>, AppError> {
    let business = sqlx::query_as::<_, Business>(
        r#"
        SELECT id, user_id, name, description, category, location, created_at, updated_at
        FROM businesses
        WHERE id = $1
        "#,
    )
    .bind(business_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::BusinessNotFound)?;

    Ok(Json(business.into()))
}
