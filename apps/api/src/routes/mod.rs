pub mod catalog;
pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::planner::handlers as planner;
use crate::relay;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(catalog::catalog_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(accounts::handle_signup))
        .route("/api/v1/auth/login", post(accounts::handle_login))
        .route("/api/v1/auth/logout", post(accounts::handle_logout))
        .route("/api/v1/account", patch(accounts::handle_update_account))
        // Assessment and roadmap
        .route("/api/v1/session", get(planner::handle_get_session))
        .route(
            "/api/v1/profile",
            post(planner::handle_submit_profile).delete(planner::handle_reset_profile),
        )
        .route(
            "/api/v1/roadmap/export",
            get(planner::handle_export_roadmap),
        )
        // Provider relay
        .route("/api/chat", post(relay::handle_chat))
        .with_state(state)
}
