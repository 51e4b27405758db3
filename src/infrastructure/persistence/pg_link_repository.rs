//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkMetadata, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses runtime-bound prepared statements. The `urls_short_code_key` unique
/// constraint is the authoritative uniqueness guard; its violation maps to
/// [`AppError::AliasTaken`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    owner_id: Option<i64>,
    click_count: i64,
    metadata: Json<LinkMetadata>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.short_code,
            row.original_url,
            row.owner_id,
            row.click_count,
            row.metadata.0,
            row.created_at,
        )
    }
}

const RETURNING_COLUMNS: &str =
    "id, short_code, original_url, owner_id, click_count, metadata, created_at";

fn map_create_error(e: sqlx::Error) -> AppError {
    if is_unique_violation_on_code(&e) {
        return AppError::alias_taken(
            "Alias already exists",
            serde_json::json!({ "constraint": "urls_short_code_key" }),
        );
    }

    e.into()
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row: LinkRow = sqlx::query_as(&format!(
            "INSERT INTO urls (short_code, original_url, owner_id, metadata) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .bind(Json(&new_link.metadata))
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_create_error)?;

        Ok(row.into())
    }

    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<Vec<Link>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        let mut created = Vec::with_capacity(new_links.len());

        for new_link in &new_links {
            let row: LinkRow = sqlx::query_as(&format!(
                "INSERT INTO urls (short_code, original_url, owner_id, metadata) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING {RETURNING_COLUMNS}"
            ))
            .bind(&new_link.short_code)
            .bind(&new_link.original_url)
            .bind(new_link.owner_id)
            .bind(Json(&new_link.metadata))
            .fetch_one(&mut *tx)
            .await
            .map_err(map_create_error)?;

            created.push(row.into());
        }

        tx.commit().await.map_err(AppError::from)?;

        Ok(created)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "SELECT {RETURNING_COLUMNS} FROM urls WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn existing_codes(&self, codes: &[String]) -> Result<HashSet<String>, AppError> {
        let found: Vec<String> =
            sqlx::query_scalar("SELECT short_code FROM urls WHERE short_code = ANY($1)")
                .bind(codes)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(found.into_iter().collect())
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_qr_code(&self, id: i64, qr_data_url: &str) -> Result<(), AppError> {
        // Guarded by the absence check so concurrent repairs stay idempotent.
        sqlx::query(
            "UPDATE urls \
             SET metadata = jsonb_set(metadata, '{qrCode}', to_jsonb($2::text), true) \
             WHERE id = $1 AND metadata->>'qrCode' IS NULL",
        )
        .bind(id)
        .bind(qr_data_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(&format!(
            "SELECT {RETURNING_COLUMNS} FROM urls \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
