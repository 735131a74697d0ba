//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staybook_core::types::{DbId, Timestamp};

/// A review row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub lodging_id: DbId,
    pub user_id: DbId,
    pub body: String,
    /// 1..=10, enforced both in the handler and by a CHECK constraint.
    pub score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new review. The author comes from the authenticated user.
#[derive(Debug)]
pub struct CreateReview {
    pub lodging_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub score: i32,
}

/// DTO for updating an existing review. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReview {
    pub body: Option<String>,
    pub score: Option<i32>,
}
