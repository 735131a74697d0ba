//! Booking entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staybook_core::types::{Day, DbId, Timestamp};

/// Booking payment lifecycle, mapped to the `booking_status` Postgres enum.
///
/// Status only moves forward: `PaymentPending -> Paid` or
/// `PaymentPending/Paid -> Canceled`. `Canceled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PaymentPending,
    Paid,
    Canceled,
}

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub lodging_id: DbId,
    pub user_id: DbId,
    /// Half-open stay interval `[date_from, date_to)`.
    pub date_from: Day,
    pub date_to: Day,
    pub status: BookingStatus,
    pub payment_intent_id: Option<String>,
    pub reference_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new booking. The guest comes from the authenticated
/// user and the reference code is generated server-side.
#[derive(Debug)]
pub struct CreateBooking {
    pub lodging_id: DbId,
    pub user_id: DbId,
    pub date_from: Day,
    pub date_to: Day,
    pub reference_code: String,
}
