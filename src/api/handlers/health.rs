//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::dto::{CacheTierStatus, CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// `GET /health` — reports component health.
///
/// Responds `200 OK` with `"healthy"` when the database and every cache
/// tier answer their probes, otherwise `503 Service Unavailable` with
/// `"degraded"`. An unhealthy cache tier degrades the report but the
/// service keeps running on the remaining tiers.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.url_service.ping_store().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(e.to_string()),
        },
    };

    let cache: Vec<CacheTierStatus> = state
        .cache
        .health()
        .await
        .into_iter()
        .map(|tier| CacheTierStatus {
            name: tier.name.to_string(),
            status: if tier.healthy { "ok" } else { "error" }.to_string(),
        })
        .collect();

    let all_ok = database.status == "ok" && cache.iter().all(|tier| tier.status == "ok");

    let (status_code, status) = if all_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    (status_code, Json(response))
}
