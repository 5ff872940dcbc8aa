//! HTTP request handlers.

pub mod history;
pub mod message;

use crate::http::error::AppError;

/// Fallback for any method a route does not accept.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for unknown paths when no widget directory is served.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
