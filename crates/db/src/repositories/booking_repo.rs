//! Repository for the `bookings` table.
//!
//! Booking creation is the one multi-statement transaction in the system:
//! the availability check and the insert must see the same state, so both
//! run inside a transaction that first locks the lodging row. Two concurrent
//! requests for the same lodging serialize on that lock; neither can insert
//! an overlapping row after the other's check.

use sqlx::PgPool;
use staybook_core::types::{Day, DbId};

use crate::models::booking::{Booking, CreateBooking};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lodging_id, user_id, date_from, date_to, status, \
                        payment_intent_id, reference_code, created_at, updated_at";

/// Outcome of a checked booking creation.
#[derive(Debug)]
pub enum BookingCreateOutcome {
    /// The interval was free; the booking was inserted as `payment_pending`.
    Created(Booking),
    /// The interval overlaps an existing non-canceled booking.
    Overlap,
    /// The lodging row no longer exists.
    LodgingMissing,
}

/// Provides operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Atomically check availability and insert a booking.
    ///
    /// Date-range validation (past start, inverted range) belongs to the
    /// caller; this method only enforces the overlap invariant.
    pub async fn create_checked(
        pool: &PgPool,
        input: &CreateBooking,
    ) -> Result<BookingCreateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Serialize availability checks per lodging.
        let lodging: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM lodgings WHERE id = $1 FOR UPDATE")
                .bind(input.lodging_id)
                .fetch_optional(&mut *tx)
                .await?;
        if lodging.is_none() {
            return Ok(BookingCreateOutcome::LodgingMissing);
        }

        // Half-open overlap: existing.date_from < new.date_to AND
        // existing.date_to > new.date_from. Canceled bookings free the dates.
        let (overlaps,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE lodging_id = $1
                  AND status <> 'canceled'
                  AND date_from < $3
                  AND date_to > $2
             )",
        )
        .bind(input.lodging_id)
        .bind(input.date_from)
        .bind(input.date_to)
        .fetch_one(&mut *tx)
        .await?;
        if overlaps {
            return Ok(BookingCreateOutcome::Overlap);
        }

        let query = format!(
            "INSERT INTO bookings (lodging_id, user_id, date_from, date_to, reference_code)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(input.lodging_id)
            .bind(input.user_id)
            .bind(input.date_from)
            .bind(input.date_to)
            .bind(&input.reference_code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(BookingCreateOutcome::Created(booking))
    }

    /// Whether `[date_from, date_to)` overlaps a non-canceled booking.
    ///
    /// Read-only variant for availability queries; creation re-checks under
    /// the lodging lock.
    pub async fn has_overlap(
        pool: &PgPool,
        lodging_id: DbId,
        date_from: Day,
        date_to: Day,
    ) -> Result<bool, sqlx::Error> {
        let (overlaps,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE lodging_id = $1
                  AND status <> 'canceled'
                  AND date_from < $3
                  AND date_to > $2
             )",
        )
        .bind(lodging_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(pool)
        .await?;
        Ok(overlaps)
    }

    /// Find a booking by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookings made by a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all bookings for a lodging, ordered by stay start.
    pub async fn list_for_lodging(
        pool: &PgPool,
        lodging_id: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE lodging_id = $1 ORDER BY date_from"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(lodging_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a payment intent id to a pending booking.
    ///
    /// Returns the updated row, or `None` if the booking is missing or no
    /// longer `payment_pending`.
    pub async fn set_payment_intent(
        pool: &PgPool,
        id: DbId,
        payment_intent_id: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET payment_intent_id = $2
             WHERE id = $1 AND status = 'payment_pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(payment_intent_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition a pending booking to `paid`.
    ///
    /// Returns `None` when the booking is missing or not `payment_pending`;
    /// the caller distinguishes "already paid" (idempotent success) from
    /// "canceled" by re-reading the row.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = 'paid'
             WHERE id = $1 AND status = 'payment_pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a booking. `canceled` is terminal, so the guard excludes it;
    /// both pending and paid bookings may be canceled.
    ///
    /// Returns `None` when the booking is missing or already canceled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = 'canceled'
             WHERE id = $1 AND status <> 'canceled'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
