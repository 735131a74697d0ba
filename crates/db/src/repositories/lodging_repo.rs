//! Repository for the `lodgings` table.

use sqlx::PgPool;
use staybook_core::types::DbId;

use crate::models::lodging::{CreateLodging, Lodging, LodgingFilter, UpdateLodging};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, kind, city_id, owner_id, street, street_number, \
                        postal_code, description, price_per_night_cents, max_guests, \
                        room_count, created_at, updated_at";

/// Provides CRUD operations for lodgings.
pub struct LodgingRepo;

impl LodgingRepo {
    /// Insert a new lodging owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLodging,
    ) -> Result<Lodging, sqlx::Error> {
        let query = format!(
            "INSERT INTO lodgings
                (name, kind, city_id, owner_id, street, street_number, postal_code,
                 description, price_per_night_cents, max_guests, room_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lodging>(&query)
            .bind(&input.name)
            .bind(input.kind)
            .bind(input.city_id)
            .bind(owner_id)
            .bind(&input.street)
            .bind(&input.street_number)
            .bind(&input.postal_code)
            .bind(&input.description)
            .bind(input.price_per_night_cents)
            .bind(input.max_guests)
            .bind(input.room_count)
            .fetch_one(pool)
            .await
    }

    /// Find a lodging by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lodging>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lodgings WHERE id = $1");
        sqlx::query_as::<_, Lodging>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List lodgings matching the filter, newest first, paginated.
    pub async fn list(
        pool: &PgPool,
        filter: &LodgingFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lodging>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lodgings
             WHERE ($1::BIGINT IS NULL OR city_id = $1)
               AND ($2::lodging_kind IS NULL OR kind = $2)
               AND ($3::BIGINT IS NULL OR price_per_night_cents <= $3)
               AND ($4::INT IS NULL OR max_guests >= $4)
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Lodging>(&query)
            .bind(filter.city_id)
            .bind(filter.kind)
            .bind(filter.max_price_cents)
            .bind(filter.min_guests)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all lodgings owned by a user, newest first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Lodging>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lodgings WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Lodging>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lodging. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLodging,
    ) -> Result<Option<Lodging>, sqlx::Error> {
        let query = format!(
            "UPDATE lodgings SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                city_id = COALESCE($4, city_id),
                street = COALESCE($5, street),
                street_number = COALESCE($6, street_number),
                postal_code = COALESCE($7, postal_code),
                description = COALESCE($8, description),
                price_per_night_cents = COALESCE($9, price_per_night_cents),
                max_guests = COALESCE($10, max_guests),
                room_count = COALESCE($11, room_count)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lodging>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.kind)
            .bind(input.city_id)
            .bind(&input.street)
            .bind(&input.street_number)
            .bind(&input.postal_code)
            .bind(&input.description)
            .bind(input.price_per_night_cents)
            .bind(input.max_guests)
            .bind(input.room_count)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lodging by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lodgings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
