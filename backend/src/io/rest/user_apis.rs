//! # REST API for Users

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use shared::RegisterUserRequest;

use super::error_response;
use super::mappers::UserMapper;
use crate::AppState;

/// Create the user document on first sign-in; existing users are returned as stored
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - user: {}", request.id);

    let command = UserMapper::to_register_command(request);
    match state.user_service.ensure_user(command).await {
        Ok(user) => (StatusCode::OK, Json(UserMapper::to_user_response(user))).into_response(),
        Err(e) => error_response("Failed to register user", e),
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}", user_id);

    match state.user_service.get_user(&user_id).await {
        Ok(user) => (StatusCode::OK, Json(UserMapper::to_user_response(user))).into_response(),
        Err(e) => error_response("Failed to get user", e),
    }
}
