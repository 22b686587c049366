//! HTTP request handlers, one module per resource.

pub mod chat;
pub mod info;
pub mod service;
pub mod session;

use uuid::Uuid;

use crate::http::error::AppError;

/// Parse a UUID from a path or body value, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.trim()
        .parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}
