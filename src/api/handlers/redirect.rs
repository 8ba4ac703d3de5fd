//! Short code redirection handler.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header::LOCATION};
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// `GET /{code}` — redirects to the original URL with `302 Found`.
///
/// Codes that cannot have come out of the generator are rejected without
/// touching the store. A `302` (not `301`) keeps clients coming back so
/// every visit is counted.
pub async fn redirect(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short URL not found",
            json!({ "code": code }),
        ));
    }

    let record = state.url_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(LOCATION, record.original_url)]))
}
