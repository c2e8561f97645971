//! gRPC status → HTTP error.

use axum_helpers::AppError;
use tonic::{Code, Status};

pub fn from_status(status: Status) -> AppError {
    let message = status.message().to_string();
    match status.code() {
        Code::InvalidArgument => AppError::BadRequest(message),
        Code::NotFound => AppError::NotFound(message),
        Code::AlreadyExists => AppError::Conflict(message),
        Code::Unauthenticated => AppError::Unauthorized(message),
        Code::DeadlineExceeded | Code::Unavailable => AppError::ServiceUnavailable(message),
        code => AppError::InternalServerError(format!("{code:?}: {message}")),
    }
}

/// Ownership pre-checks: a missing task reads as a bad request so callers
/// cannot probe for other users' ids.
pub fn from_ownership_status(status: Status) -> AppError {
    match status.code() {
        Code::NotFound => AppError::BadRequest("task does not belong to the caller".to_string()),
        _ => from_status(status),
    }
}
