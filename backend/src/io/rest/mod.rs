//! # REST API Interface Layer
//!
//! HTTP endpoints of the storefront backend. Handlers translate shared DTOs
//! into domain commands, call the services and map results back. Domain
//! errors become a JSON `ErrorResponse` with a matching status code:
//!
//! - `NotFound` → 404
//! - `InvalidState` → 409
//! - `Validation` → 400
//! - `UpstreamIo` → 502

pub mod allocation_apis;
pub mod mappers;
pub mod product_apis;
pub mod user_apis;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use shared::ErrorResponse;

use crate::domain::AllocationError;

pub fn status_for(err: &AllocationError) -> StatusCode {
    match err {
        AllocationError::NotFound { .. } => StatusCode::NOT_FOUND,
        AllocationError::InvalidState(_) => StatusCode::CONFLICT,
        AllocationError::Validation(_) => StatusCode::BAD_REQUEST,
        AllocationError::UpstreamIo(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Log a failed operation and turn it into an error response
pub fn error_response(context: &str, err: AllocationError) -> Response {
    let status = status_for(&err);
    if err.is_retryable() {
        error!("{}: {:#}", context, err);
    } else {
        warn!("{}: {}", context, err);
    }

    let body = ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
    };
    (status, Json(body)).into_response()
}
