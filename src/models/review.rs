//! Review data models and API request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review row joined with its author's username.
///
/// Maps to the `reviews` table plus `users.username`; listings show who
/// wrote each review without a second query.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Review {
    /// Unique identifier for this review
    pub id: Uuid,

    /// Business this review is about
    pub business_id: Uuid,

    /// User that wrote the review
    pub user_id: Uuid,

    /// Author's display name, joined from `users`
    pub username: String,

    /// The review body
    pub review_text: String,

    /// Timestamp when the review was posted
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/business/{id}/reviews`.
///
/// ```json
/// { "review_text": "Great service, fair prices." }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub review_text: Option<String>,
}
