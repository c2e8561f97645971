use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use axum_helpers::{AppError, CurrentUser, ValidatedForm, clear_session_cookie, session_cookie};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authenticate;
use crate::error::from_status;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn signed_in(state: &AppState, user_id: Uuid) -> Result<Response, AppError> {
    let token = state
        .tokens
        .issue(user_id)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, state.secure_cookies))],
        Redirect::to("/tasks"),
    )
        .into_response())
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .client
        .create_user(form.username, form.password)
        .await
        .map_err(from_status)?;

    let user_id = Uuid::parse_str(&user.id)
        .map_err(|e| AppError::InternalServerError(format!("malformed user id: {e}")))?;
    info!(user_id = %user_id, "Registered user");

    signed_in(&state, user_id)
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = authenticate(state.client.as_ref(), &form.username, &form.password)
        .await
        .map_err(|_| AppError::Unauthorized("Invalid username or password".to_string()))?;

    signed_in(&state, user_id)
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
    )
}

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    state
        .client
        .delete_user(user_id)
        .await
        .map_err(from_status)?;

    info!(user_id = %user_id, "Deleted account");
    Ok((
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        Redirect::to("/landing"),
    ))
}
