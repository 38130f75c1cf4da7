//! Country repository
//!
//! - get_by_id: live rows only (`deleted_at IS NULL`)
//! - create: INSERT relying on the unique slug constraint, no check-then-insert

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Country, CountryError};

/// Storage boundary for countries
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Country, CountryError>;

    /// Insert `country`, refreshing its timestamps from the database.
    async fn create(&self, country: &mut Country) -> Result<(), CountryError>;
}

/// Postgres-backed country repository
#[derive(Clone)]
pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Country, CountryError> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, code, slug, position, created_at, updated_at, deleted_at
            FROM countries
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CountryError::NotFound)
    }

    async fn create(&self, country: &mut Country) -> Result<(), CountryError> {
        let result = sqlx::query_as::<_, (DateTime<Utc>, DateTime<Utc>)>(
            r#"
            INSERT INTO countries (id, name, code, slug, position, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(country.id)
        .bind(&country.name)
        .bind(&country.code)
        .bind(&country.slug)
        .bind(country.position)
        .bind(country.deleted_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((created_at, updated_at)) => {
                country.created_at = created_at;
                country.updated_at = updated_at;
                tracing::debug!(id = %country.id, slug = %country.slug, "country created");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(CountryError::SlugExists),
            Err(e) => Err(e.into()),
        }
    }
}
