#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use snaplink::application::services::{ActivityMonitor, UrlService};
use snaplink::domain::entities::{NewUrlRecord, UrlRecord};
use snaplink::domain::repositories::{UrlListQuery, UrlRepository};
use snaplink::error::AppError;
use snaplink::infrastructure::cache::{CacheBackend, FallbackCache, MemoryCache};
use snaplink::state::AppState;
use serde_json::json;

/// In-memory stand-in for the Postgres repository so handler tests run
/// without a database.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    next_id: AtomicI64,
    fail_ping: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_ping: AtomicBool::new(false),
        }
    }

    pub fn set_ping_failure(&self, fail: bool) {
        self.fail_ping.store(fail, Ordering::SeqCst);
    }

    /// Inserts a record directly, bypassing the service pipeline.
    pub fn seed(&self, device_id: &str, code: &str, url: &str) -> UrlRecord {
        let record = UrlRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            original_url: url.to_string(),
            short_code: code.to_string(),
            device_id: device_id.to_string(),
            clicks: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub fn clicks_of(&self, code: &str) -> Option<i64> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.short_code == code)
            .map(|r| r.clicks)
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut records = self.records.lock().unwrap();

        if records
            .iter()
            .any(|r| r.short_code == new_record.short_code)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let record = UrlRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            original_url: new_record.original_url,
            short_code: new_record.short_code,
            device_id: new_record.device_id,
            clicks: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.short_code == code)
            .cloned())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.short_code == code))
    }

    async fn list_by_device(
        &self,
        device_id: &str,
        query: UrlListQuery,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let mut matched: Vec<UrlRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.device_id == device_id)
            .filter(|r| match &query.search {
                Some(term) => r
                    .original_url
                    .to_lowercase()
                    .contains(&term.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matched
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn count_by_device(
        &self,
        device_id: &str,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        let count = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.device_id == device_id)
            .filter(|r| match &search {
                Some(term) => r
                    .original_url
                    .to_lowercase()
                    .contains(&term.to_lowercase()),
                None => true,
            })
            .count();
        Ok(count as i64)
    }

    async fn update_original_url(&self, id: i64, url: &str) -> Result<UrlRecord, AppError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        record.original_url = url.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.short_code == code) {
            record.clicks += 1;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database unreachable", json!({})));
        }
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<FallbackCache>,
}

pub fn create_test_state() -> TestContext {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(FallbackCache::new(vec![
        Arc::new(MemoryCache::new(256, 3600)) as Arc<dyn CacheBackend>,
    ]));

    let url_service = Arc::new(UrlService::new(repository.clone(), cache.clone()));
    let activity = Arc::new(ActivityMonitor::new());

    let state = AppState::new(
        url_service,
        cache.clone(),
        activity,
        "http://short.test".to_string(),
    );

    TestContext {
        state,
        repository,
        cache,
    }
}
