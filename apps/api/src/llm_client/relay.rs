//! Client for a chat relay: a thin server that holds the provider key and
//! answers `{"content": ".."}` or `{"error": ".."}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    post_with_retry, ChatMessage, CompletionBackend, CompletionRequest, LlmError, ResponseFormat,
    RetryOn,
};

/// Request body accepted by the relay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Relay reply: exactly one of the two fields is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    url: String,
    model: String,
}

impl RelayClient {
    pub fn new(url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            model,
        })
    }
}

#[async_trait]
impl CompletionBackend for RelayClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = RelayRequest {
            messages: request.messages.clone(),
            model: Some(self.model.clone()),
            response_format: request.response_format.clone(),
        };
        // The relay retries its own provider call, so only a failed send is
        // retried here. An `{error}` reply is final.
        let response = post_with_retry(&self.client, &self.url, None, &body, RetryOn::TransportOnly)
            .await
            .map_err(|e| match e {
                LlmError::Api { message, .. } => LlmError::Relay(message),
                other => other,
            })?;
        let reply: RelayReply = response.json().await?;
        match (reply.content, reply.error) {
            (_, Some(error)) => Err(LlmError::Relay(error)),
            (content, None) => Ok(content.unwrap_or_default()),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::scripted_endpoint;
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![ChatMessage::user("plan my weeks")],
            response_format: Some(ResponseFormat::JsonObject),
        }
    }

    fn relay(url: String) -> RelayClient {
        RelayClient::new(url, "mixtral-8x7b-32768".to_string(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_relay_content_is_returned() {
        let (url, _) =
            scripted_endpoint(vec![(200, serde_json::json!({"content": "{\"a\":1}"}))]).await;
        let text = relay(url).complete(&request()).await.unwrap();
        assert_eq!(text, "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_relay_error_field_becomes_error() {
        let (url, _) =
            scripted_endpoint(vec![(200, serde_json::json!({"error": "quota exceeded"}))]).await;
        let err = relay(url).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Relay(msg) if msg == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_relay_server_error_is_not_retried() {
        let failure = serde_json::json!({"error": "Groq API error: quota"});
        let (url, hits) = scripted_endpoint(vec![(500, failure.clone()), (500, failure)]).await;
        let err = relay(url).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Relay(msg) if msg == "Groq API error: quota"));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_relay_missing_content_is_empty() {
        let (url, _) = scripted_endpoint(vec![(200, serde_json::json!({}))]).await;
        let text = relay(url).complete(&request()).await.unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_relay_request_accepts_messages_only() {
        let json = r#"{"messages": [{"role": "user", "content": "hi"}]}"#;
        let req: RelayRequest = serde_json::from_str(json).unwrap();
        assert!(req.model.is_none());
        assert_eq!(req.messages.len(), 1);
    }
}
