use crate::api::{ChatClient, ChatTransport};
use crate::config::Config;
use crate::types::ModelType;
use crate::views::ChatView;
use dioxus::prelude::*;
use std::sync::Arc;

const DEEPEUC_CSS: Asset = asset!("/assets/deepeuc.css");

/// Transport handed to the views through context.
#[derive(Clone)]
pub struct SharedTransport(pub Arc<dyn ChatTransport>);

impl SharedTransport {
    pub fn new(transport: impl ChatTransport + 'static) -> Self {
        Self(Arc::new(transport))
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context_provider(Config::from_env);
    use_context_provider(|| SharedTransport::new(ChatClient::from_config(&config)));
    let current_model = use_signal(ModelType::default);

    rsx! {
        document::Link { rel: "stylesheet", href: DEEPEUC_CSS }
        div { class: "app-shell",
            AppHeader { model: current_model() }
            ChatView { current_model }
        }
    }
}

#[component]
fn AppHeader(model: ModelType) -> Element {
    rsx! {
        div { class: "header no-divider",
            h1 { class: "header-title",
                span { class: "header-brand", "{brand_prefix(&model)}" }
                "EUC"
            }
        }
    }
}

fn brand_prefix(model: &ModelType) -> &'static str {
    if model.is_deepseek() { "deep" } else { "Gemini" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_follows_selected_model() {
        assert_eq!(brand_prefix(&ModelType::DeepSeek), "deep");
        assert_eq!(brand_prefix(&ModelType::Gemini20Flash), "Gemini");
    }
}
