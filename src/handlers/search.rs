//! Business search HTTP handler.
//!
//! Implements `GET /api/v1/search`: case-insensitive substring match on
//! business names, optionally narrowed by category and location, paginated.

use crate::{
    AppState,
    error::AppError,
    models::business::{Business, BusinessResponse},
    validate,
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Query parameters for `GET /api/v1/search`.
///
/// `q` is required; `cat` and `loc` narrow the result set when present.
/// The default page size of 2 matches the directory's compact search UI.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub cat: Option<String>,
    pub loc: Option<String>,

    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    2
}

/// Search businesses by name substring.
///
/// # Endpoint
///
/// `GET /api/v1/search?q=&cat=&loc=&page=&limit=` (public)
///
/// # Matching
///
/// The query term matches anywhere in the business name, case
/// insensitively (ILIKE). When `cat` or `loc` are supplied they are
/// applied the same way against category and location.
///
/// # Response
///
/// - **Success (200 OK)** with matches:
///   `{"businesses": [...], "next_page": false}`
/// - **Success (200 OK)** with no matches:
///   `{"message": "Your search for <q> did not match any business"}`
/// - **Error (422)**: Missing or blank `q`
pub async fn search_businesses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    validate::require_fields(&[("search term", params.q.as_deref())])?;
    let term = validate::normalize_spaces(params.q.as_deref().unwrap_or_default());

    let limit = (params.limit.clamp(1, 100)) as i64;
    let offset = (params.page.max(1) as i64 - 1) * limit;

    // NULL refinement parameters disable their clause entirely
    let category = params.cat.as_deref().filter(|c| !c.trim().is_empty());
    let location = params.loc.as_deref().filter(|l| !l.trim().is_empty());

    let mut matches = sqlx::query_as::<_, Business>(
        r#"
        SELECT id, user_id, name, description, category, location, created_at, updated_at
        FROM businesses
        WHERE name ILIKE '%' || $1 || '%'
          AND ($2::TEXT IS NULL OR category ILIKE '%' || $2 || '%')
          AND ($3::TEXT IS NULL OR location ILIKE '%' || $3 || '%')
        ORDER BY created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(&term)
    .bind(category)
    .bind(location)
    // One extra row tells us whether a next page exists
    .bind(limit + 1)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    if matches.is_empty() {
        return Ok(Json(json!({
            "message": format!("Your search for {term} did not match any business"),
        })));
    }

    let next_page = matches.len() as i64 > limit;
    matches.truncate(limit as usize);

    let responses: Vec<BusinessResponse> = matches.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "businesses": responses,
        "next_page": next_page,
    })))
}
