//! Accounts service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::info;

use crate::{
    error::AccountError,
    extract::Payload,
    models::{
        ChangePasswordRequest, RefreshAvatarRequest, RemoveProfileRequest,
        RestoreProfileRequest, SignupRequest, UpdateAvatarRequest,
    },
    state::AppState,
};

/// Create the router for the accounts service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/user/signup", post(signup))
        .route("/user/profile/:id", get(profile))
        .route("/user/remove-profile", put(remove_profile))
        .route("/user/restore-profile", put(restore_profile))
        .route("/user/restore-gravatar-url", put(restore_gravatar_url))
        .route("/user/update-profile/:id", put(update_profile))
        .route("/user/change-password", put(change_password))
        .route("/user/admin-users", get(admin_users))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "accounts-service"
    }))
}

/// Create an account
pub async fn signup(
    State(state): State<AppState>,
    Payload(payload): Payload<SignupRequest>,
) -> Result<impl IntoResponse, AccountError> {
    info!("Signup attempt for username: {:?}", payload.username);

    let user = state.account_service.signup(payload).await?;
    Ok(Json(user))
}

/// Fetch a single profile
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccountError> {
    let user = state.account_service.get_profile(&id).await?;
    Ok(Json(user))
}

/// Soft-delete a profile
pub async fn remove_profile(
    State(state): State<AppState>,
    Payload(payload): Payload<RemoveProfileRequest>,
) -> Result<impl IntoResponse, AccountError> {
    state.account_service.remove_profile(payload).await?;
    Ok(StatusCode::OK)
}

/// Restore a soft-deleted profile
pub async fn restore_profile(
    State(state): State<AppState>,
    Payload(payload): Payload<RestoreProfileRequest>,
) -> Result<impl IntoResponse, AccountError> {
    let user = state.account_service.restore_profile(payload).await?;
    Ok(Json(user))
}

/// Recompute the gravatar URL for an email
pub async fn restore_gravatar_url(
    State(state): State<AppState>,
    Payload(payload): Payload<RefreshAvatarRequest>,
) -> Result<impl IntoResponse, AccountError> {
    let url = state.account_service.refresh_avatar(payload)?;
    Ok(Json(url))
}

/// Overwrite the stored gravatar URL
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateAvatarRequest>,
) -> Result<impl IntoResponse, AccountError> {
    let user = state.account_service.update_avatar(&id, payload).await?;
    Ok(Json(user))
}

/// Replace the password
pub async fn change_password(
    State(state): State<AppState>,
    Payload(payload): Payload<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AccountError> {
    let user = state.account_service.change_password(payload).await?;
    Ok(Json(user))
}

/// List every account
pub async fn admin_users(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AccountError> {
    let users = state.account_service.list_all_users().await?;
    Ok(Json(users))
}
