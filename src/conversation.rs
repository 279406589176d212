//! Conversation state: transcript, draft input and the pending indicator.
//!
//! The view owns one `Conversation` inside a signal and forwards discrete
//! events to it (edit, submit, timer tick, transport settle). Every change to
//! the transcript is written through the injected store.

use crate::api::TransportResult;
use crate::storage::MessageStore;
use crate::types::{ChatMessage, ModelType};
use std::time::Duration;
use tokio::time::{Instant, interval_at};

pub const ERROR_REPLY: &str = "Error: Could not get a response.";

pub const STATUS_MESSAGES: [&str; 4] = [
    "Tenker ut noe lurt...",
    "Grubler og funderer...",
    "Prosesserer spørsmålet...",
    "Analyserer muligheter...",
];

pub const STATUS_ROTATE_INTERVAL: Duration = Duration::from_secs(5);
pub const ELAPSED_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Work the caller has to hand to the transport after a successful submit.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub text: String,
    pub model: ModelType,
}

pub struct Conversation {
    messages: Vec<ChatMessage>,
    draft: String,
    pending: Option<PendingRequest>,
    status_index: usize,
    elapsed_secs: u64,
    last_id: i64,
    store: Box<dyn MessageStore>,
}

impl Conversation {
    /// Restores the transcript from `store` and writes it straight back.
    pub fn load(store: Box<dyn MessageStore>) -> Self {
        let messages = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable chat history");
            Vec::new()
        });
        let last_id = messages
            .iter()
            .filter_map(|msg| msg.id.parse::<i64>().ok())
            .max()
            .unwrap_or(i64::MIN);
        let conversation = Self {
            messages,
            draft: String::new(),
            pending: None,
            status_index: 0,
            elapsed_secs: 0,
            last_id,
            store,
        };
        conversation.persist();
        conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    pub fn status_message(&self) -> &'static str {
        STATUS_MESSAGES[self.status_index]
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Indicator text shown in the pending bubble, e.g. `Grubler og funderer... (7s)`.
    pub fn status_line(&self) -> String {
        format!("{} ({}s)", self.status_message(), self.elapsed_secs)
    }

    /// Starts a request from the current draft.
    ///
    /// Returns `None` without touching anything when the draft is blank or a
    /// request is already in flight. The draft stays as typed until `settle`.
    pub fn submit(&mut self, model: ModelType, now_ms: i64) -> Option<PendingRequest> {
        if self.draft.trim().is_empty() || self.is_pending() {
            return None;
        }

        let request = PendingRequest {
            text: self.draft.clone(),
            model,
        };
        let id = self.next_id(now_ms);
        self.messages.push(
            ChatMessage::user(request.text.clone(), request.model.clone(), now_ms).with_id(id),
        );
        self.reset_indicator();
        self.pending = Some(request.clone());
        self.persist();
        Some(request)
    }

    /// Records the transport outcome and returns to idle.
    pub fn settle(&mut self, outcome: TransportResult<String>, now_ms: i64) {
        let Some(request) = self.pending.take() else {
            return;
        };

        let text = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(error = %err, model = %request.model, "chat request failed");
                ERROR_REPLY.to_string()
            }
        };
        let id = self.next_id(now_ms);
        self.messages
            .push(ChatMessage::assistant(text, request.model, now_ms).with_id(id));
        self.draft.clear();
        self.reset_indicator();
        self.persist();
    }

    pub fn rotate_status(&mut self) {
        if self.is_pending() {
            self.status_index = (self.status_index + 1) % STATUS_MESSAGES.len();
        }
    }

    pub fn tick_elapsed(&mut self) {
        if self.is_pending() {
            self.elapsed_secs += 1;
        }
    }

    /// Millisecond timestamp id, bumped past the last one handed out so
    /// entries created in the same millisecond stay distinct.
    fn next_id(&mut self, now_ms: i64) -> String {
        let id = now_ms.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id.to_string()
    }

    fn reset_indicator(&mut self) {
        self.status_index = 0;
        self.elapsed_secs = 0;
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.messages) {
            tracing::warn!(error = %err, "failed to persist chat history");
        }
    }
}

/// Drives the pending indicator: `rotate` every [`STATUS_ROTATE_INTERVAL`],
/// `tick` every [`ELAPSED_TICK_INTERVAL`]. Runs until the future is dropped
/// or its task is cancelled.
pub async fn run_indicator(mut rotate: impl FnMut(), mut tick: impl FnMut()) {
    let start = Instant::now();
    let mut status = interval_at(start + STATUS_ROTATE_INTERVAL, STATUS_ROTATE_INTERVAL);
    let mut elapsed = interval_at(start + ELAPSED_TICK_INTERVAL, ELAPSED_TICK_INTERVAL);
    loop {
        tokio::select! {
            _ = status.tick() => rotate(),
            _ = elapsed.tick() => tick(),
        }
    }
}

pub fn now_millis() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    (now.unix_timestamp_nanos() / 1_000_000) as i64
}
