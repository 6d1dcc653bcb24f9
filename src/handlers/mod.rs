pub mod bookings;
pub mod health;
pub mod items;
pub mod users;

use axum::http::HeaderMap;

use crate::errors::AppError;

/// Requester identity travels in the `X-User-Id` header.
pub(crate) fn requester_id(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidInput("missing X-User-Id header".to_string()))
}
