pub mod activity_monitor;
pub mod url_service;

pub use activity_monitor::ActivityMonitor;
pub use url_service::{ProcessedUrl, UrlPage, UrlService};
