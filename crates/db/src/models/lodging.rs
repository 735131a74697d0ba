//! Lodging entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staybook_core::types::{DbId, Timestamp};

/// Kind of lodging, mapped to the `lodging_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lodging_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LodgingKind {
    Apartment,
    House,
    Room,
    Villa,
}

/// A lodging row from the `lodgings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lodging {
    pub id: DbId,
    pub name: String,
    pub kind: LodgingKind,
    pub city_id: DbId,
    pub owner_id: DbId,
    pub street: String,
    pub street_number: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    /// Nightly price in minor currency units.
    pub price_per_night_cents: i64,
    pub max_guests: i32,
    pub room_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lodging. The owner comes from the authenticated
/// partner, never from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLodging {
    pub name: String,
    pub kind: LodgingKind,
    pub city_id: DbId,
    pub street: String,
    pub street_number: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub price_per_night_cents: i64,
    pub max_guests: i32,
    pub room_count: i32,
}

/// DTO for updating an existing lodging. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLodging {
    pub name: Option<String>,
    pub kind: Option<LodgingKind>,
    pub city_id: Option<DbId>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub price_per_night_cents: Option<i64>,
    pub max_guests: Option<i32>,
    pub room_count: Option<i32>,
}

/// Query filters for listing lodgings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LodgingFilter {
    pub city_id: Option<DbId>,
    pub kind: Option<LodgingKind>,
    pub max_price_cents: Option<i64>,
    pub min_guests: Option<i32>,
}
