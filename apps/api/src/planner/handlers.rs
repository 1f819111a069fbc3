//! Axum route handlers for the assessment and roadmap.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::accounts::handlers::require_session;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::planner::View;
use crate::state::AppState;

/// GET /api/v1/session
///
/// Which screen the UI should show right now.
pub async fn handle_get_session(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    Ok(Json(state.planner.current_view()?))
}

/// POST /api/v1/profile
///
/// Submits an assessment and waits for its roadmap. On a generation failure
/// the response is an error, and the session view becomes a dashboard with
/// no roadmap.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<View>, AppError> {
    let session = require_session(&state)?;
    state.planner.submit_profile(&session, profile).await?;
    Ok(Json(state.planner.current_view()?))
}

/// DELETE /api/v1/profile
///
/// Resets the assessment. The previous roadmap is discarded.
pub async fn handle_reset_profile(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    let session = require_session(&state)?;
    state.planner.reset(&session)?;
    Ok(Json(state.planner.current_view()?))
}

/// GET /api/v1/roadmap/export
pub async fn handle_export_roadmap(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let session = require_session(&state)?;
    let markdown = state
        .planner
        .export_markdown(&session)?
        .ok_or_else(|| AppError::NotFound("No roadmap has been generated yet".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}
