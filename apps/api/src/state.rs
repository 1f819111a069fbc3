use crate::accounts::AccountStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::planner::Planner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountStore,
    pub planner: Planner,
    /// Provider client behind `POST /api/chat`. `None` when this process
    /// itself generates through a remote relay.
    pub provider: Option<LlmClient>,
    pub config: Config,
}
