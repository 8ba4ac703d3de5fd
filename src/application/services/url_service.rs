//! Short URL registration and resolution service.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{UrlListQuery, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{FallbackCache, redirect_key};
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::{normalize_url, sanitize_url, validate_url};

/// Collision retry budget for code generation.
const MAX_CODE_ATTEMPTS: usize = 20;

/// A freshly registered record plus the intermediate pipeline forms,
/// surfaced to the client so it can see what was repaired.
#[derive(Debug, Clone)]
pub struct ProcessedUrl {
    pub record: UrlRecord,
    pub sanitized: String,
    pub normalized: String,
}

/// One page of a device's records.
#[derive(Debug, Clone)]
pub struct UrlPage {
    pub records: Vec<UrlRecord>,
    pub total: i64,
}

/// Service for registering, managing and resolving short URLs.
///
/// Every stored URL goes through the sanitize → normalize → validate
/// pipeline; raw client input never reaches the repository. Redirect
/// lookups are read-through cached, deletes invalidate the cache, updates
/// deliberately do not (stale entries age out with the TTL).
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<FallbackCache>,
}

impl UrlService {
    pub fn new(repository: Arc<dyn UrlRepository>, cache: Arc<FallbackCache>) -> Self {
        Self { repository, cache }
    }

    /// Registers a URL for a device and returns the new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with the full error list when the
    /// URL fails RFC 1738 validation. Returns [`AppError::Internal`] when
    /// the code generator exhausts its retry budget.
    pub async fn create(&self, device_id: &str, raw_url: &str) -> Result<ProcessedUrl, AppError> {
        let report = validate_url(raw_url);
        if !report.valid {
            return Err(AppError::validation(
                "The given URL is not RFC 1738 compliant",
                json!({ "errors": report.errors }),
            ));
        }

        let sanitized = sanitize_url(raw_url);
        let normalized = normalize_url(raw_url);

        let record = self.insert_with_fresh_code(device_id, &normalized).await?;

        counter!("snaplink_urls_created_total").increment(1);
        info!("Registered {} -> {}", record.short_code, record.original_url);

        Ok(ProcessedUrl {
            record,
            sanitized,
            normalized,
        })
    }

    /// Lists one page of a device's records, newest first.
    pub async fn list(
        &self,
        device_id: &str,
        page: i64,
        per_page: i64,
        search: Option<String>,
    ) -> Result<UrlPage, AppError> {
        let total = self
            .repository
            .count_by_device(device_id, search.clone())
            .await?;

        let records = self
            .repository
            .list_by_device(
                device_id,
                UrlListQuery {
                    search,
                    offset: (page - 1) * per_page,
                    limit: per_page,
                },
            )
            .await?;

        Ok(UrlPage { records, total })
    }

    /// Fetches a single record owned by the device.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Forbidden`] when the record belongs to another device.
    /// Existence is checked before ownership.
    pub async fn get(&self, device_id: &str, id: i64) -> Result<UrlRecord, AppError> {
        self.find_owned(device_id, id).await
    }

    /// Replaces the target URL of an owned record.
    ///
    /// The replacement goes through the full pipeline. The redirect cache
    /// is left alone: a stale entry serves the old target until the TTL
    /// expires, which is the documented trade-off.
    pub async fn update(
        &self,
        device_id: &str,
        id: i64,
        raw_url: &str,
    ) -> Result<ProcessedUrl, AppError> {
        self.find_owned(device_id, id).await?;

        let report = validate_url(raw_url);
        if !report.valid {
            return Err(AppError::validation(
                "The given URL is not RFC 1738 compliant",
                json!({ "errors": report.errors }),
            ));
        }

        let sanitized = sanitize_url(raw_url);
        let normalized = normalize_url(raw_url);

        let record = self
            .repository
            .update_original_url(id, &normalized)
            .await?;

        Ok(ProcessedUrl {
            record,
            sanitized,
            normalized,
        })
    }

    /// Deletes an owned record and invalidates its cache entry in every
    /// tier.
    pub async fn delete(&self, device_id: &str, id: i64) -> Result<(), AppError> {
        let record = self.find_owned(device_id, id).await?;

        self.repository.delete(id).await?;
        self.cache.forget(&redirect_key(&record.short_code)).await;

        Ok(())
    }

    /// Resolves a short code for redirection and counts the click.
    ///
    /// Reads through the cache chain; only found records are cached. The
    /// click increment is awaited so the counter is exact even under
    /// concurrent redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes.
    pub async fn resolve(&self, code: &str) -> Result<UrlRecord, AppError> {
        let key = redirect_key(code);

        let record = match self.lookup_cached(&key).await {
            Some(record) => record,
            None => {
                let Some(record) = self.repository.find_by_code(code).await? else {
                    warn!("Failed redirection: unknown code {}", code);
                    return Err(AppError::not_found(
                        "Short URL not found",
                        json!({ "code": code }),
                    ));
                };

                if let Ok(payload) = serde_json::to_string(&record) {
                    self.cache.put(&key, &payload).await;
                }

                record
            }
        };

        self.repository.increment_clicks(code).await?;
        counter!("snaplink_redirects_total").increment(1);

        Ok(record)
    }

    async fn lookup_cached(&self, key: &str) -> Option<UrlRecord> {
        let payload = self.cache.get(key).await?;

        match serde_json::from_str(&payload) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                self.cache.forget(key).await;
                None
            }
        }
    }

    async fn find_owned(&self, device_id: &str, id: i64) -> Result<UrlRecord, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        if !record.is_owned_by(device_id) {
            return Err(AppError::forbidden(
                "URL belongs to another device",
                json!({ "id": id }),
            ));
        }

        Ok(record)
    }

    /// Inserts a record, drawing fresh codes until one sticks.
    ///
    /// The exists pre-check keeps the common path cheap; the unique
    /// constraint settles races, surfacing as a Conflict that triggers
    /// another draw.
    async fn insert_with_fresh_code(
        &self,
        device_id: &str,
        original_url: &str,
    ) -> Result<UrlRecord, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code();

            if self.repository.code_exists(&code).await? {
                continue;
            }

            match self
                .repository
                .create(NewUrlRecord {
                    original_url: original_url.to_string(),
                    short_code: code,
                    device_id: device_id.to_string(),
                })
                .await
            {
                Ok(record) => return Ok(record),
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Health probe of the underlying repository.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
