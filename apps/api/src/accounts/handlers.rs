use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::accounts::{AccountError, Session};
use crate::errors::AppError;
use crate::planner::View;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub new_email: String,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Resolves the signed-in session or fails with 401.
pub fn require_session(state: &AppState) -> Result<Session, AppError> {
    state
        .accounts
        .current_account()?
        .map(|(session, _)| session)
        .ok_or_else(|| AppError::Unauthorized("Sign in to continue".to_string()))
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<View>), AppError> {
    state.accounts.create_account(&req.email, &req.password)?;
    Ok((StatusCode::CREATED, Json(state.planner.current_view()?)))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<View>, AppError> {
    state
        .accounts
        .authenticate(&req.email, &req.password)
        .map_err(|e| match e {
            AccountError::NotFound(_) => AppError::Unauthorized(e.to_string()),
            other => other.into(),
        })?;
    Ok(Json(state.planner.current_view()?))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    if let Some((session, _)) = state.accounts.current_account()? {
        state.planner.forget(&session);
    }
    state.accounts.detach_session()?;
    Ok(Json(View::Auth))
}

/// PATCH /api/v1/account
///
/// Changes the account email and, if given, the password.
pub async fn handle_update_account(
    State(state): State<AppState>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<View>, AppError> {
    let session = require_session(&state)?;
    state
        .planner
        .rename(&session, &req.new_email, req.new_password.as_deref())?;
    Ok(Json(state.planner.current_view()?))
}
