//! Handlers for the URL management endpoints.
//!
//! Thin by design: request decoding and shape checks happen here, every
//! business rule lives in [`UrlService`](crate::application::services::UrlService).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use validator::Validate;

use crate::api::dto::{
    ListUrlsQuery, PaginatedUrls, ProcessedUrlResponse, StoreUrlRequest, UpdateUrlRequest,
    UrlResponse,
};
use crate::api::middleware::DeviceId;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/urls` — registers a URL and returns the new short code.
///
/// Responds `201 Created` with the stored record plus the sanitized and
/// normalized intermediate forms.
pub async fn store(
    State(state): State<AppState>,
    device: DeviceId,
    Json(payload): Json<StoreUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    state.activity.inspect_url(device.as_str(), &payload.url);

    let processed = state
        .url_service
        .create(device.as_str(), &payload.url)
        .await?;

    let response = ProcessedUrlResponse {
        url: UrlResponse::from_record(processed.record, &state.base_url),
        sanitized: processed.sanitized,
        normalized: processed.normalized,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/urls` — lists the device's URLs, newest first, paginated.
pub async fn index(
    State(state): State<AppState>,
    device: DeviceId,
    Query(query): Query<ListUrlsQuery>,
) -> Result<Json<PaginatedUrls>, AppError> {
    let (page, per_page, search) = query
        .resolve()
        .map_err(|message| AppError::validation(message, json!({})))?;

    let result = state
        .url_service
        .list(device.as_str(), page, per_page, search)
        .await?;

    let data = result
        .records
        .into_iter()
        .map(|record| UrlResponse::from_record(record, &state.base_url))
        .collect();

    Ok(Json(PaginatedUrls::new(page, per_page, result.total, data)))
}

/// `GET /api/urls/{id}` — fetches one of the device's URLs.
pub async fn show(
    State(state): State<AppState>,
    device: DeviceId,
    Path(id): Path<i64>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state.url_service.get(device.as_str(), id).await?;

    Ok(Json(UrlResponse::from_record(record, &state.base_url)))
}

/// `PUT /api/urls/{id}` — replaces the target URL of an owned record.
pub async fn update(
    State(state): State<AppState>,
    device: DeviceId,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<ProcessedUrlResponse>, AppError> {
    payload.validate()?;
    state.activity.inspect_url(device.as_str(), &payload.url);

    let processed = state
        .url_service
        .update(device.as_str(), id, &payload.url)
        .await?;

    Ok(Json(ProcessedUrlResponse {
        url: UrlResponse::from_record(processed.record, &state.base_url),
        sanitized: processed.sanitized,
        normalized: processed.normalized,
    }))
}

/// `DELETE /api/urls/{id}` — deletes an owned record.
///
/// Responds `204 No Content`.
pub async fn destroy(
    State(state): State<AppState>,
    device: DeviceId,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.url_service.delete(device.as_str(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
