//! Business data models and API request/response types.
//!
//! This module defines:
//! - `Business`: Database entity representing a business listing
//! - `BusinessPayload`: Request body shared by create and update
//! - `BusinessResponse`: Response body returned to clients
//! - `PageParams`: Pagination query parameters for list endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a business record from the database.
///
/// # Database Table
///
/// Maps to the `businesses` table. Each business:
/// - Belongs to one owning user (via `user_id`)
/// - Can only be updated or deleted by that owner
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Business {
    /// Unique identifier for this business
    pub id: Uuid,

    /// Foreign key to the user that owns this business
    ///
    /// Mutation handlers always compare this against the authenticated
    /// caller before touching the row.
    pub user_id: Uuid,

    /// Business name, target of the substring search
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Category label (e.g. "Farming"), search refinement filter
    pub category: String,

    /// Location label (e.g. "Narok"), search refinement filter
    pub location: String,

    /// Timestamp when the business was registered
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a business.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "KTDA",
///   "description": "Tea growers cooperative",
///   "category": "Farming",
///   "location": "Narok"
/// }
/// ```
///
/// Every field is required and must be non-blank; validation happens in
/// the handler so missing fields get per-field messages.
#[derive(Debug, Deserialize)]
pub struct BusinessPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

/// Request body for deleting a business.
///
/// Delete is destructive, so the owner must re-confirm their password.
#[derive(Debug, Deserialize)]
pub struct DeleteBusinessRequest {
    pub password: Option<String>,
}

/// Response body for business endpoints.
///
/// Same shape as [`Business`] minus nothing: the owner id is public so
/// clients can tell their own listings apart.
#[derive(Debug, Serialize)]
pub struct BusinessResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self {
            id: business.id,
            user_id: business.user_id,
            name: business.name,
            description: business.description,
            category: business.category,
            location: business.location,
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

/// Pagination query parameters (`?page=&limit=`).
///
/// Pages are 1-based. Out-of-range values are clamped rather than
/// rejected: page 0 reads as page 1, and limit is capped at 100.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    5
}

impl PageParams {
    /// Rows to skip for the requested page.
    pub fn offset(&self) -> i64 {
        let page = self.page.max(1) as i64;
        (page - 1) * self.capped_limit()
    }

    /// Page size with the clamp applied.
    pub fn capped_limit(&self) -> i64 {
        (self.limit.clamp(1, 100)) as i64
    }
}
