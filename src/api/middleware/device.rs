//! Device identification extractor.
//!
//! Every management endpoint is scoped to the caller's `X-Device-ID`
//! header. The header value is an opaque client-chosen token; there is no
//! account system behind it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde_json::json;

use crate::error::AppError;

pub const DEVICE_ID_HEADER: &str = "X-Device-ID";

/// The caller's device identity, taken from the `X-Device-ID` header.
///
/// Rejects the request with `400 Bad Request` when the header is missing,
/// empty or not valid UTF-8.
#[derive(Debug, Clone)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for DeviceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match value {
            Some(device_id) => Ok(DeviceId(device_id.to_string())),
            None => Err(AppError::bad_request(
                "Device ID required",
                json!({ "header": DEVICE_ID_HEADER }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<DeviceId, AppError> {
        let (mut parts, _) = request.into_parts();
        DeviceId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_present_header_is_extracted() {
        let request = Request::builder()
            .header("X-Device-ID", "device-123")
            .body(())
            .unwrap();

        let device = extract(request).await.unwrap();
        assert_eq!(device.as_str(), "device-123");
    }

    #[tokio::test]
    async fn test_missing_header_is_bad_request() {
        let request = Request::builder().body(()).unwrap();

        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_blank_header_is_bad_request() {
        let request = Request::builder()
            .header("X-Device-ID", "   ")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
