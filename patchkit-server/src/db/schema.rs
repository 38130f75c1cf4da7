//! Table definitions, created on startup if missing

use sqlx::PgPool;

/// Create the service tables.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            full_name TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            avatar_url TEXT NOT NULL DEFAULT '',
            role TEXT NOT NULL DEFAULT 'member',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            position INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchkit_core::Nullable;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn deleted_at_reads_as_nullable() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("pool creation failed");
        run(&pool).await.expect("schema failed");

        let id = uuid::Uuid::new_v4();
        sqlx::query("INSERT INTO countries (id, name, code, slug) VALUES ($1, 'X', 'XX', $2)")
            .bind(id)
            .bind(format!("nullable-{}", id.simple()))
            .execute(&pool)
            .await
            .expect("insert failed");

        let (deleted_at,): (Nullable<chrono::DateTime<chrono::Utc>>,) =
            sqlx::query_as("SELECT deleted_at FROM countries WHERE id = $1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .expect("query failed");
        assert_eq!(deleted_at, Nullable::Null);

        sqlx::query("UPDATE countries SET deleted_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Nullable::of(chrono::Utc::now()))
            .execute(&pool)
            .await
            .expect("update failed");

        let (deleted_at,): (Nullable<chrono::DateTime<chrono::Utc>>,) =
            sqlx::query_as("SELECT deleted_at FROM countries WHERE id = $1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .expect("query failed");
        assert!(deleted_at.is_valid());
    }
}
