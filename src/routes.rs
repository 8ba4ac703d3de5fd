//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short URL redirect (public)
//! - `GET  /health`   - Health check: DB, cache tiers (public)
//! - `/api/*`         - Management REST API (`X-Device-ID` required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the management API
//! - **Activity monitoring** - Log-only traffic heuristics on the management API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health, redirect};
use crate::api::middleware::{activity, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            activity::record,
        ))
        .layer(rate_limit::layer());

    let router = Router::new()
        .route("/{code}", get(redirect::redirect))
        .route("/health", get(health::health))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
