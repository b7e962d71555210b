//! Caller identification extractors.
//!
//! Full authentication is handled upstream of this service; requests reach
//! it with the caller's ids in trusted headers. `x-user-id` identifies the
//! person whose data is addressed, `x-mentor-id` the mentor performing a
//! validation review.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use skillgauge_core::types::DbId;

use crate::error::AppError;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the acting mentor's id.
pub const MENTOR_ID_HEADER: &str = "x-mentor-id";

fn id_from_header(parts: &Parts, header: &'static str) -> Result<DbId, AppError> {
    let value = parts
        .headers
        .get(header)
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {header} header")))?;
    value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<DbId>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Unauthorized(format!("{header} must be a positive integer")))
}

/// Extracts the acting user's id from the `x-user-id` header.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        id_from_header(parts, USER_ID_HEADER).map(Self)
    }
}

/// Extracts the acting mentor's id from the `x-mentor-id` header.
#[derive(Debug, Clone, Copy)]
pub struct MentorId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for MentorId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        id_from_header(parts, MENTOR_ID_HEADER).map(Self)
    }
}
