//! Url record entity: one registered short code and its target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered short URL owned by a device.
///
/// `original_url` always holds the sanitized and normalized form, never the
/// raw client input. Records are serialized as JSON when cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub device_id: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Returns true when `device_id` owns this record.
    pub fn is_owned_by(&self, device_id: &str) -> bool {
        self.device_id == device_id
    }
}

/// Input data for registering a new short URL.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub device_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UrlRecord {
        UrlRecord {
            id: 1,
            original_url: "https://example.com/path".to_string(),
            short_code: "ABC234".to_string(),
            device_id: "device-1".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ownership_check() {
        let record = record();
        assert!(record.is_owned_by("device-1"));
        assert!(!record.is_owned_by("device-2"));
    }

    #[test]
    fn test_record_survives_json_round_trip() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let back: UrlRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
