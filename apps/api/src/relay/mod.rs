//! Chat relay: forwards `{messages, model}` to the configured provider so
//! the browser never holds the provider key. Replies are `{content}` on
//! success and `{error}` otherwise.

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::llm_client::relay::{RelayReply, RelayRequest};
use crate::state::AppState;

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<RelayRequest>,
) -> (StatusCode, Json<RelayReply>) {
    let Some(provider) = state.provider.as_ref() else {
        return reply_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Relay is disabled: this server has no provider API key".to_string(),
        );
    };
    if req.messages.is_empty() {
        return reply_error(StatusCode::BAD_REQUEST, "messages cannot be empty".to_string());
    }

    let model = req.model.as_deref().unwrap_or(&state.config.llm_model);
    match provider
        .chat(model, &req.messages, req.response_format.as_ref())
        .await
    {
        Ok(content) => (
            StatusCode::OK,
            Json(RelayReply {
                content: Some(content),
                error: None,
            }),
        ),
        Err(e) => {
            error!("Relay call failed: {e}");
            reply_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn reply_error(status: StatusCode, message: String) -> (StatusCode, Json<RelayReply>) {
    (
        status,
        Json(RelayReply {
            content: None,
            error: Some(message),
        }),
    )
}
