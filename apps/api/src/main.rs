mod accounts;
mod config;
mod errors;
mod llm_client;
mod models;
mod planner;
mod relay;
mod roadmap;
mod routes;
mod state;
mod storage;

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::accounts::AccountStore;
use crate::config::{Config, MEMORY_STORE};
use crate::llm_client::{CompletionBackend, LlmClient, RelayClient};
use crate::planner::Planner;
use crate::roadmap::RoadmapGenerator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Planify API v{}", env!("CARGO_PKG_VERSION"));

    // Account store
    let kv: Arc<dyn KeyValueStore> = if config.store_path == MEMORY_STORE {
        info!("Using in-memory store; accounts will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let store = FileStore::new(&config.store_path);
        info!("Using file store at {}", store.path().display());
        Arc::new(store)
    };
    let accounts = AccountStore::new(kv);

    // Provider client, also served to browsers through the relay endpoint
    let provider = match &config.llm_api_key {
        Some(key) => Some(
            LlmClient::new(
                config.llm_api_url.clone(),
                key.clone(),
                config.llm_model.clone(),
                config.llm_timeout,
            )
            .context("Failed to build LLM client")?,
        ),
        None => None,
    };

    // Roadmap generation goes through the relay when one is configured
    let backend: Arc<dyn CompletionBackend> = match (&config.relay_url, &provider) {
        (Some(url), _) => Arc::new(
            RelayClient::new(url.clone(), config.llm_model.clone(), config.llm_timeout)
                .context("Failed to build relay client")?,
        ),
        (None, Some(client)) => Arc::new(client.clone()),
        (None, None) => bail!("Set LLM_API_KEY or RELAY_URL"),
    };
    info!("Roadmap backend initialized (model: {})", backend.model());

    let planner = Planner::new(accounts.clone(), RoadmapGenerator::new(backend));

    // Build app state
    let state = AppState {
        accounts,
        planner,
        provider,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port)
        .parse()
        .context("BIND_ADDR and PORT must form a socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
