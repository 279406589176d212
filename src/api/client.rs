use super::{ChatTransport, TransportError, TransportResult};
use crate::config::Config;
use crate::types::ModelType;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP client for `POST {base}/api/chat`
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub model: &'a ModelType,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: ReplyPayload,
}

/// The backend has shipped both a bare string and `{ "reply": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplyPayload {
    Text(String),
    Wrapped { reply: String },
}

impl ReplyPayload {
    pub fn into_text(self) -> String {
        match self {
            ReplyPayload::Text(text) => text,
            ReplyPayload::Wrapped { reply } => reply,
        }
    }
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chat_endpoint())
    }

    pub fn from_env() -> Self {
        Self::from_config(&Config::from_env())
    }
}

/// Extracts the reply text from a response body.
pub fn parse_reply(body: &str) -> TransportResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    Ok(parsed.response.into_text())
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ChatTransport for ChatClient {
    async fn send_message(&self, text: &str, model: &ModelType) -> TransportResult<String> {
        tracing::debug!(endpoint = %self.endpoint, model = %model, "sending chat message");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                message: text,
                model,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "chat backend rejected request");
            return Err(TransportError::Status { status, body });
        }

        parse_reply(&body).inspect_err(|err| {
            tracing::warn!(error = %err, "chat backend sent an unexpected body");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_string_reply() {
        assert_eq!(parse_reply(r#"{"response":"hi there"}"#).unwrap(), "hi there");
    }

    #[test]
    fn parses_wrapped_reply() {
        assert_eq!(
            parse_reply(r#"{"response":{"reply":"wrapped"}}"#).unwrap(),
            "wrapped"
        );
    }

    #[test]
    fn rejects_missing_response_field() {
        assert!(matches!(
            parse_reply(r#"{"reply":"nope"}"#),
            Err(TransportError::Decode(_))
        ));
        assert!(parse_reply("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn request_body_uses_wire_ids() {
        let body = serde_json::to_value(ChatRequest {
            message: "hello",
            model: &ModelType::Gemini20FlashLite,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "message": "hello",
                "model": "gemini-2.0-flash-lite-preview-02-05"
            })
        );
    }
}
