//! Request and response DTOs for the URL management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::UrlRecord;
use crate::utils::url_validator::MAX_URL_LENGTH;

/// Body of `POST /api/urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct StoreUrlRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be between 1 and 2048 characters"))]
    pub url: String,
}

/// Body of `PUT /api/urls/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be between 1 and 2048 characters"))]
    pub url: String,
}

/// Query parameters of `GET /api/urls`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListUrlsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,
}

impl ListUrlsQuery {
    /// Validates list parameters and applies defaults.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `per_page`: 15
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Per-page must be between 1 and 100
    /// - Search term must be at most 255 characters
    ///
    /// # Returns
    ///
    /// `(page, per_page, search)` ready for the service layer.
    pub fn resolve(self) -> Result<(i64, i64, Option<String>), String> {
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(15);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&per_page) {
            return Err("Per-page must be between 1 and 100".to_string());
        }

        if let Some(ref search) = self.search
            && search.len() > 255
        {
            return Err("Search term must be at most 255 characters".to_string());
        }

        let search = self.search.filter(|s| !s.is_empty());

        Ok((page as i64, per_page as i64, search))
    }
}

/// One URL record as exposed by the management API.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), record.short_code);
        Self {
            id: record.id,
            original_url: record.original_url,
            short_code: record.short_code,
            short_url,
            clicks: record.clicks,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response of `POST /api/urls` and `PUT /api/urls/{id}`.
///
/// Carries the intermediate pipeline forms so clients can see what was
/// repaired before storage.
#[derive(Debug, Serialize)]
pub struct ProcessedUrlResponse {
    #[serde(flatten)]
    pub url: UrlResponse,
    pub sanitized: String,
    pub normalized: String,
}

/// Paginated list envelope for `GET /api/urls`.
#[derive(Debug, Serialize)]
pub struct PaginatedUrls {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    pub data: Vec<UrlResponse>,
}

impl PaginatedUrls {
    pub fn new(current_page: i64, per_page: i64, total: i64, data: Vec<UrlResponse>) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            current_page,
            per_page,
            total,
            last_page,
            data,
        }
    }
}

// `MAX_URL_LENGTH` and the validator attribute above must agree.
const _: () = assert!(MAX_URL_LENGTH == 2048);

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<u32>, per_page: Option<u32>, search: Option<&str>) -> ListUrlsQuery {
        ListUrlsQuery {
            page,
            per_page,
            search: search.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults() {
        let (page, per_page, search) = query(None, None, None).resolve().unwrap();
        assert_eq!(page, 1);
        assert_eq!(per_page, 15);
        assert!(search.is_none());
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(query(Some(0), None, None).resolve().is_err());
    }

    #[test]
    fn test_per_page_bounds() {
        assert!(query(None, Some(0), None).resolve().is_err());
        assert!(query(None, Some(1), None).resolve().is_ok());
        assert!(query(None, Some(100), None).resolve().is_ok());
        assert!(query(None, Some(101), None).resolve().is_err());
    }

    #[test]
    fn test_empty_search_becomes_none() {
        let (_, _, search) = query(None, None, Some("")).resolve().unwrap();
        assert!(search.is_none());
    }

    #[test]
    fn test_oversized_search_is_error() {
        let long = "x".repeat(256);
        assert!(query(None, None, Some(&long)).resolve().is_err());
    }

    #[test]
    fn test_last_page_math() {
        assert_eq!(PaginatedUrls::new(1, 15, 0, vec![]).last_page, 1);
        assert_eq!(PaginatedUrls::new(1, 15, 15, vec![]).last_page, 1);
        assert_eq!(PaginatedUrls::new(1, 15, 16, vec![]).last_page, 2);
        assert_eq!(PaginatedUrls::new(1, 15, 31, vec![]).last_page, 3);
    }

    #[test]
    fn test_short_url_built_from_base() {
        use chrono::Utc;
        let record = UrlRecord {
            id: 1,
            original_url: "https://example.com".to_string(),
            short_code: "ABC234".to_string(),
            device_id: "d".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UrlResponse::from_record(record, "https://snap.example.com/");
        assert_eq!(response.short_url, "https://snap.example.com/ABC234");
    }
}
