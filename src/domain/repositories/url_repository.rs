//! Repository trait for short URL data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Filtered page request for a device's records.
#[derive(Debug, Clone, Default)]
pub struct UrlListQuery {
    /// Substring match against `original_url`, case-insensitive.
    pub search: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

/// Repository interface for short URL records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken;
    /// the unique constraint is the final arbiter of code collisions.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns true when a short code is already registered.
    ///
    /// An advisory pre-check only; a concurrent insert can still win the
    /// race, which surfaces as a Conflict from [`UrlRepository::create`].
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists a device's records, newest first.
    async fn list_by_device(
        &self,
        device_id: &str,
        query: UrlListQuery,
    ) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts a device's records under the same filter as
    /// [`UrlRepository::list_by_device`].
    async fn count_by_device(
        &self,
        device_id: &str,
        search: Option<String>,
    ) -> Result<i64, AppError>;

    /// Replaces `original_url` and touches `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `id`.
    async fn update_original_url(&self, id: i64, original_url: &str)
    -> Result<UrlRecord, AppError>;

    /// Deletes a record. Returns `Ok(true)` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically adds one click to the record behind `code`.
    ///
    /// A single SQL update, so concurrent redirects never lose counts.
    /// `updated_at` is left untouched.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), AppError>;
}
