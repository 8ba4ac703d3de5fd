//! Log-only heuristics for spotting abusive traffic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::warn;

/// Sliding window for the per-device request-rate check.
const RATE_WINDOW: Duration = Duration::from_secs(300);
/// Requests within [`RATE_WINDOW`] before a device is flagged.
const SUSPICIOUS_REQUEST_THRESHOLD: usize = 50;

/// Sliding window for the burst check.
const BURST_WINDOW: Duration = Duration::from_secs(60);
/// Requests within [`BURST_WINDOW`] before a device is flagged.
const HIGH_FREQUENCY_THRESHOLD: usize = 20;

/// Submitted URLs longer than this are flagged as potential DoS payloads.
const LONG_URL_THRESHOLD: usize = 4000;

/// Flagged when more than this share of a URL is non-alphanumeric.
const SPECIAL_CHAR_RATIO: f64 = 0.7;

/// Substrings that mark a submitted URL as an injection attempt.
const SUSPICIOUS_PATTERNS: &[(&str, &str)] = &[
    ("javascript:", "JavaScript scheme detected"),
    ("data:", "Data URI detected"),
    ("file:", "File scheme detected"),
    ("vbscript:", "VBScript scheme detected"),
    ("<script", "Script tag in URL"),
    ("eval(", "JavaScript eval detected"),
    ("document.cookie", "Cookie access attempt"),
    ("localstorage", "LocalStorage access attempt"),
];

/// Observes request traffic and submitted payloads, logging anomalies.
///
/// Purely advisory: nothing here rejects a request. Hard limits are the
/// rate-limiting middleware's job. Windows are tracked per device id and
/// per client IP, pruned on every touch so memory stays bounded by the set
/// of recently active keys.
#[derive(Default)]
pub struct ActivityMonitor {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
}

impl ActivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one request and flags rate anomalies for the device and IP.
    pub fn record_request(&self, device_id: Option<&str>, ip: &str) {
        self.track(&format!("ip:{ip}"), Instant::now());

        if let Some(device_id) = device_id {
            self.track(&format!("device:{device_id}"), Instant::now());
        }
    }

    /// Scans a submitted URL for injection markers, oversized payloads and
    /// encoding smokescreens.
    pub fn inspect_url(&self, device_id: &str, url: &str) {
        let lowered = url.to_lowercase();
        for (pattern, reason) in SUSPICIOUS_PATTERNS {
            if lowered.contains(pattern) {
                warn!(device_id, reason, "Suspicious URL submitted");
            }
        }

        if url.len() > LONG_URL_THRESHOLD {
            warn!(
                device_id,
                length = url.len(),
                "Extremely long URL detected"
            );
        }

        let special = url.chars().filter(|c| !c.is_ascii_alphanumeric()).count();
        if !url.is_empty() && special as f64 > url.len() as f64 * SPECIAL_CHAR_RATIO {
            warn!(device_id, "High special character ratio in URL");
        }
    }

    fn track(&self, key: &str, now: Instant) {
        let Ok(mut windows) = self.windows.lock() else {
            return;
        };

        let timestamps = windows.entry(key.to_string()).or_default();
        timestamps.retain(|&t| now.duration_since(t) < RATE_WINDOW);
        timestamps.push(now);

        let total = timestamps.len();
        let recent = timestamps
            .iter()
            .filter(|&&t| now.duration_since(t) < BURST_WINDOW)
            .count();

        if total > SUSPICIOUS_REQUEST_THRESHOLD {
            warn!(
                key,
                request_count = total,
                window_seconds = RATE_WINDOW.as_secs(),
                "High request rate detected"
            );
        }

        if recent > HIGH_FREQUENCY_THRESHOLD {
            warn!(
                key,
                request_count = recent,
                window_seconds = BURST_WINDOW.as_secs(),
                "High frequency activity detected"
            );
        }
    }

    /// Number of requests currently tracked for a device.
    #[cfg(test)]
    fn tracked(&self, key: &str) -> usize {
        self.windows
            .lock()
            .map(|w| w.get(key).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request_tracks_device_and_ip() {
        let monitor = ActivityMonitor::new();

        monitor.record_request(Some("device-1"), "10.0.0.1");
        monitor.record_request(Some("device-1"), "10.0.0.1");
        monitor.record_request(None, "10.0.0.2");

        assert_eq!(monitor.tracked("device:device-1"), 2);
        assert_eq!(monitor.tracked("ip:10.0.0.1"), 2);
        assert_eq!(monitor.tracked("ip:10.0.0.2"), 1);
        assert_eq!(monitor.tracked("device:unknown"), 0);
    }

    #[test]
    fn test_window_prunes_old_entries() {
        let monitor = ActivityMonitor::new();
        let old = Instant::now() - RATE_WINDOW - Duration::from_secs(1);

        monitor.track("device:d", old);
        monitor.track("device:d", Instant::now());

        assert_eq!(monitor.tracked("device:d"), 1);
    }

    #[test]
    fn test_inspect_url_does_not_panic_on_edge_inputs() {
        let monitor = ActivityMonitor::new();

        monitor.inspect_url("d", "");
        monitor.inspect_url("d", "javascript:alert(1)");
        monitor.inspect_url("d", &"%".repeat(5000));
        monitor.inspect_url("d", "https://example.com/normal");
    }
}
