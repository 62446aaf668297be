//! Review HTTP handlers, scoped to a business.
//!
//! - POST /api/v1/business/{id}/reviews - Post a review (auth)
//! - GET /api/v1/business/{id}/reviews - List a business's reviews

use crate::{
    AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::review::{CreateReviewRequest, Review},
    validate,
};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Reviews can only target a business that exists; 404 otherwise.
async fn ensure_business_exists(state: &AppState, business_id: Uuid) -> Result<(), AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM businesses WHERE id = $1")
        .bind(business_id)
        .fetch_optional(&state.pool)
        .await?;
    exists.map(|_| ()).ok_or(AppError::BusinessNotFound)
}

/// Post a review against a business.
///
/// # Endpoint
///
/// `POST /api/v1/business/{id}/reviews`
///
/// # Authentication
///
/// Requires a valid bearer token; the caller becomes the author. Owners
/// may review their own business; the directory does not referee that.
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": ..., "review": {...}}`
/// - **Error (404)**: No such business
/// - **Error (422)**: Missing or blank review text
pub async fn create_review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(business_id): Path<Uuid>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedJson)?;

    validate::require_fields(&[("review", request.review_text.as_deref())])?;
    let review_text = request.review_text.as_deref().unwrap_or_default().trim();

    ensure_business_exists(&state, business_id).await?;

    let review = sqlx::query_as::<_, Review>(
        r#"
        WITH inserted AS (
            INSERT INTO reviews (business_id, user_id, review_text)
            VALUES ($1, $2, $3)
            RETURNING id, business_id, user_id, review_text, created_at
        )
        SELECT i.id, i.business_id, i.user_id, u.username, i.review_text, i.created_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#,
    )
    .bind(business_id)
    .bind(auth.user_id)
    .bind(review_text)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(business_id = %business_id, author = %auth.user_id, "review posted");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Review added successfully",
            "review": review,
        })),
    ))
}

/// List all reviews for a business, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/business/{id}/reviews` (public)
///
/// # Response
///
/// - **Success (200 OK)**: `{"reviews": [...]}` (may be empty)
/// - **Error (404)**: No such business
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    ensure_business_exists(&state, business_id).await?;

    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT r.id, r.business_id, r.user_id, u.username, r.review_text, r.created_at
        FROM reviews r
        JOIN users u ON u.id = r.user_id
        WHERE r.business_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(business_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(json!({ "reviews": reviews })))
}
