//! Repository for the `cities` table.

use sqlx::PgPool;
use staybook_core::types::DbId;

use crate::models::city::{City, CreateCity, UpdateCity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, region, country_id, created_at, updated_at";

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Insert a new city, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCity) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name, region, country_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(&input.region)
            .bind(input.country_id)
            .fetch_one(pool)
            .await
    }

    /// Find a city by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cities ordered by name, optionally filtered by country.
    pub async fn list(
        pool: &PgPool,
        country_id: Option<DbId>,
    ) -> Result<Vec<City>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cities
             WHERE ($1::BIGINT IS NULL OR country_id = $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(country_id)
            .fetch_all(pool)
            .await
    }

    /// Update a city. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCity,
    ) -> Result<Option<City>, sqlx::Error> {
        let query = format!(
            "UPDATE cities SET
                name = COALESCE($2, name),
                region = COALESCE($3, region),
                country_id = COALESCE($4, country_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.region)
            .bind(input.country_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a city by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
