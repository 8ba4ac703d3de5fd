//! Request/response data transfer objects.

pub mod health;
pub mod url;

pub use health::{CacheTierStatus, CheckStatus, HealthChecks, HealthResponse};
pub use url::{
    ListUrlsQuery, PaginatedUrls, ProcessedUrlResponse, StoreUrlRequest, UpdateUrlRequest,
    UrlResponse,
};
