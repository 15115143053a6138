//! Postgres-backed document store.
//!
//! Documents live in a single `document` table: a `collection` discriminator,
//! a UUID primary key, and the body as JSONB. All queries use runtime sqlx
//! queries with binds; there is no per-collection schema.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{DocumentStore, StoreError, strip_identity};

/// How many collection names the diagnostics listing reports.
const COLLECTION_LISTING_LIMIT: i64 = 10;

/// Create a Postgres connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the `document` table and its index if they do not exist.
///
/// Runs at startup; there is no separate migrations tool in this workspace.
///
/// # Errors
///
/// Returns `sqlx::Error` if either DDL statement fails.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS document (
            id         uuid PRIMARY KEY,
            collection text NOT NULL,
            doc        jsonb NOT NULL,
            created_at timestamptz NOT NULL DEFAULT now()
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE INDEX IF NOT EXISTS document_collection_created_at_idx
        ON document (collection, created_at)
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Document store backed by a Postgres JSONB table.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        let doc = strip_identity(doc);

        sqlx::query("INSERT INTO document (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(&doc)
            .execute(&self.pool)
            .await?;

        Ok(id.to_string())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        // Ids that don't parse as UUIDs cannot address anything in this
        // store; report them as absent rather than as a database error.
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let doc = sqlx::query_scalar::<_, Value>(
            "SELECT doc FROM document WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc)
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value) -> Result<bool, StoreError> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(false);
        };
        let doc = strip_identity(doc);

        let result = sqlx::query("UPDATE document SET doc = $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(uuid)
            .bind(&doc)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, collection: &str, limit: i64) -> Result<Vec<(String, Value)>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, doc FROM document
            WHERE collection = $1
            ORDER BY created_at, id
            LIMIT $2
            ",
        )
        .bind(collection)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id").map_err(StoreError::Database)?;
            let doc: Value = row.try_get("doc").map_err(StoreError::Database)?;
            docs.push((id.to_string(), doc));
        }

        Ok(docs)
    }

    async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM document WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM document WHERE collection = $1")
            .bind(collection)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT collection FROM document ORDER BY collection LIMIT $1",
        )
        .bind(COLLECTION_LISTING_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
