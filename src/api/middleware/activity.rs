//! Traffic observation middleware.
//!
//! Feeds every management-API request into the
//! [`ActivityMonitor`](crate::application::services::ActivityMonitor) so
//! anomalous traffic shows up in the logs. Advisory only; requests are
//! never rejected here.

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

use crate::api::middleware::device::DEVICE_ID_HEADER;
use crate::state::AppState;

/// Records the request against its client IP and device id windows.
///
/// The peer address comes from the `ConnectInfo` extension; test servers
/// that do not attach one fall back to an `unknown` key.
pub async fn record(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let device_id = request
        .headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    state.activity.record_request(device_id.as_deref(), &ip);

    next.run(request).await
}
