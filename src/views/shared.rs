use std::time::Duration;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

/// How long a Copy button reads `Copied!` after a successful copy.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]:[second padding:zero]");

/// Local wall-clock time for an epoch-millis timestamp, e.g. `14:03:59`.
pub fn format_clock(timestamp_ms: i64) -> String {
    let nanos = i128::from(timestamp_ms) * 1_000_000;
    let Ok(mut datetime) = OffsetDateTime::from_unix_timestamp_nanos(nanos) else {
        return String::new();
    };
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).unwrap_or_default()
}

/// Puts `text` on the system clipboard; returns whether it landed there.
pub fn copy_to_clipboard(text: String) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(script) = clipboard_script(&text) else {
            return false;
        };
        // The browser write is async; a rejected promise only shows in the console.
        let _ = dioxus::document::eval(&script);
        true
    }
    #[cfg(all(
        not(target_arch = "wasm32"),
        any(feature = "desktop", feature = "mobile")
    ))]
    {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                false
            }
        }
    }
    #[cfg(all(
        not(target_arch = "wasm32"),
        not(any(feature = "desktop", feature = "mobile"))
    ))]
    {
        tracing::warn!(len = text.len(), "no clipboard on this platform");
        false
    }
}

/// `navigator.clipboard` call that writes `text` from a web page.
pub fn clipboard_script(text: &str) -> Option<String> {
    match serde_json::to_string(text) {
        Ok(literal) => Some(format!("navigator.clipboard.writeText({literal});")),
        Err(err) => {
            tracing::warn!(error = %err, "could not encode clipboard text");
            None
        }
    }
}

/// Label state of a Copy button.
///
/// Every successful copy hands out a new token; only the revert carrying the
/// latest token flips the label back, so rapid clicks keep `Copied!` up for
/// the full delay after the last one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    generation: u64,
    copied: bool,
}

impl CopyFeedback {
    pub fn label(&self) -> &'static str {
        if self.copied { "Copied!" } else { "Copy" }
    }

    pub fn mark_copied(&mut self) -> u64 {
        self.generation += 1;
        self.copied = true;
        self.generation
    }

    pub fn revert(&mut self, token: u64) {
        if token == self.generation {
            self.copied = false;
        }
    }
}

/// Waits out [`COPIED_FEEDBACK`], then runs `revert`.
pub async fn revert_after_feedback(revert: impl FnOnce()) {
    tokio::time::sleep(COPIED_FEEDBACK).await;
    revert();
}
