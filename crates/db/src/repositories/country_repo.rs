//! Repository for the `countries` table.

use sqlx::PgPool;
use staybook_core::types::DbId;

use crate::models::country::{Country, CreateCountry, UpdateCountry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for countries.
pub struct CountryRepo;

impl CountryRepo {
    /// Insert a new country, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCountry) -> Result<Country, sqlx::Error> {
        let query = format!("INSERT INTO countries (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Country>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a country by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM countries WHERE id = $1");
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all countries ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Country>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM countries ORDER BY name");
        sqlx::query_as::<_, Country>(&query).fetch_all(pool).await
    }

    /// Update a country. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCountry,
    ) -> Result<Option<Country>, sqlx::Error> {
        let query = format!(
            "UPDATE countries SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a country by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation (mapped to 409) while cities
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
