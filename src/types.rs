use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend completion model a message was sent to.
///
/// Only the named variants are offered for selection. `Legacy` keeps
/// identifiers written by older builds readable without migrating them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[default]
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "gemini-2.0-flash-lite-preview-02-05")]
    Gemini20FlashLite,
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(untagged)]
    Legacy(String),
}

impl ModelType {
    pub const SELECTABLE: [ModelType; 4] = [
        ModelType::DeepSeek,
        ModelType::Gemini20FlashLite,
        ModelType::Gemini15Flash,
        ModelType::Gemini20Flash,
    ];

    pub fn id(&self) -> &str {
        match self {
            ModelType::DeepSeek => "deepseek",
            ModelType::Gemini20FlashLite => "gemini-2.0-flash-lite-preview-02-05",
            ModelType::Gemini15Flash => "gemini-1.5-flash",
            ModelType::Gemini20Flash => "gemini-2.0-flash",
            ModelType::Legacy(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ModelType::DeepSeek => "DeepSeek",
            ModelType::Gemini20FlashLite => "Gemini 2.0 Flash lite",
            ModelType::Gemini15Flash => "Gemini 1.5 Flash",
            ModelType::Gemini20Flash => "Gemini 2.0 Flash",
            ModelType::Legacy(id) => id,
        }
    }

    /// Looks up a selectable model by its wire id.
    pub fn from_id(id: &str) -> Option<ModelType> {
        Self::SELECTABLE.into_iter().find(|model| model.id() == id)
    }

    pub fn is_deepseek(&self) -> bool {
        matches!(self, ModelType::DeepSeek)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: i64,
    pub model: ModelType,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, model: ModelType, timestamp: i64) -> Self {
        Self {
            id: timestamp.to_string(),
            text: text.into(),
            is_user: true,
            timestamp,
            model,
        }
    }

    pub fn assistant(text: impl Into<String>, model: ModelType, timestamp: i64) -> Self {
        Self {
            id: timestamp.to_string(),
            text: text.into(),
            is_user: false,
            timestamp,
            model,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_browser_field_names() {
        let msg = ChatMessage::user("hello", ModelType::DeepSeek, 1_700_000_000_000);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["isUser"], true);
        assert_eq!(json["model"], "deepseek");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn keeps_unknown_model_ids_verbatim() {
        let raw = r#"{"id":"1","text":"hi","isUser":false,"timestamp":1,"model":"gemini"}"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.model, ModelType::Legacy("gemini".to_string()));
        assert_eq!(
            serde_json::to_value(&msg).unwrap()["model"],
            serde_json::json!("gemini")
        );
    }

    #[test]
    fn known_ids_parse_to_named_variants() {
        let model: ModelType = serde_json::from_str(r#""gemini-1.5-flash""#).unwrap();
        assert_eq!(model, ModelType::Gemini15Flash);
        assert_eq!(ModelType::from_id("gemini-2.0-flash"), Some(ModelType::Gemini20Flash));
        assert_eq!(ModelType::from_id("gemini"), None);
    }

    #[test]
    fn default_model_is_first_selectable() {
        assert_eq!(ModelType::default(), ModelType::SELECTABLE[0]);
        assert!(ModelType::default().is_deepseek());
    }

    #[test]
    fn assistant_id_defaults_to_timestamp() {
        let msg = ChatMessage::assistant("ok", ModelType::Gemini20Flash, 41);
        assert_eq!(msg.id, "41");
        assert!(!msg.is_user);
        assert_eq!(msg.with_id("43").id, "43");
    }
}
