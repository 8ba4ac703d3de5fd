//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{UrlListQuery, UrlRepository};
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for short URL storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. Code
/// uniqueness is enforced by the `urls_short_code_key` constraint; unique
/// violations surface as [`AppError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (original_url, short_code, device_id)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_code, device_id, clicks, created_at, updated_at
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_code)
        .bind(&new_record.device_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, device_id, clicks, created_at, updated_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, device_id, clicks, created_at, updated_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM urls WHERE short_code = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_by_device(
        &self,
        device_id: &str,
        query: UrlListQuery,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let pattern = query.search.map(|s| format!("%{s}%"));

        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, device_id, clicks, created_at, updated_at
            FROM urls
            WHERE device_id = $1
              AND ($2::text IS NULL OR original_url ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(device_id)
        .bind(pattern)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn count_by_device(
        &self,
        device_id: &str,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM urls
            WHERE device_id = $1
              AND ($2::text IS NULL OR original_url ILIKE $2)
            "#,
        )
        .bind(device_id)
        .bind(pattern)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_original_url(
        &self,
        id: i64,
        original_url: &str,
    ) -> Result<UrlRecord, AppError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            UPDATE urls
            SET original_url = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, original_url, short_code, device_id, clicks, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| {
            AppError::not_found("URL not found", serde_json::json!({ "id": id }))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
