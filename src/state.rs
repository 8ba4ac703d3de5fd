//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{ActivityMonitor, UrlService};
use crate::infrastructure::cache::FallbackCache;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub cache: Arc<FallbackCache>,
    pub activity: Arc<ActivityMonitor>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService>,
        cache: Arc<FallbackCache>,
        activity: Arc<ActivityMonitor>,
        base_url: String,
    ) -> Self {
        Self {
            url_service,
            cache,
            activity,
            base_url,
        }
    }
}
