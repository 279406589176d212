/// Transport to the deepEUC chat backend
///
/// One operation: send a user message together with a model identifier and
/// get the reply text back.
///
/// # Usage
///
/// ```rust,no_run
/// use deepeuc::api::{ChatClient, ChatTransport};
/// use deepeuc::types::ModelType;
///
/// # async fn example() -> Result<(), deepeuc::api::TransportError> {
/// let client = ChatClient::from_env();
/// let reply = client.send_message("Hei!", &ModelType::DeepSeek).await?;
/// # Ok(())
/// # }
/// ```
mod client;

pub use client::{ChatClient, ChatRequest, ChatResponse, ReplyPayload, parse_reply};

use crate::types::ModelType;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Seam between the conversation and the network.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, text: &str, model: &ModelType) -> TransportResult<String>;
}
