//! Management API route configuration.
//!
//! All API endpoints are scoped to the caller's device via the
//! `X-Device-ID` header, extracted by
//! [`crate::api::middleware::device::DeviceId`].

use crate::api::handlers::urls;
use crate::state::AppState;
use axum::{
    Router,
    routing::get,
};

/// All management routes, scoped per device.
///
/// # Endpoints
///
/// - `GET    /urls`        - List the device's URLs (paginated, searchable)
/// - `POST   /urls`        - Register a URL and mint a short code
/// - `GET    /urls/{id}`   - Fetch one URL record
/// - `PUT    /urls/{id}`   - Replace the target URL
/// - `DELETE /urls/{id}`   - Delete a URL record
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(urls::index).post(urls::store))
        .route(
            "/urls/{id}",
            get(urls::show).put(urls::update).delete(urls::destroy),
        )
}
