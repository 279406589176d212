use crate::config::Config;
use crate::conversation::{Conversation, now_millis, run_indicator};
use crate::storage::default_store;
use crate::types::{ChatMessage, ModelType};
use crate::ui::SharedTransport;
use crate::views::code_block::MarkdownBody;
use crate::views::model_selector::ModelSelector;
use crate::views::shared::format_clock;
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn ChatView(current_model: Signal<ModelType>) -> Element {
    let mut current_model = current_model;
    let config = use_context::<Config>();
    let shared = use_context::<SharedTransport>();
    let transport = use_signal(move || shared);
    let mut conversation = use_signal(move || Conversation::load(default_store(&config)));

    let mut send_message = move || {
        let model = current_model();
        let Some(request) = conversation.with_mut(|chat| chat.submit(model, now_millis())) else {
            return;
        };
        let transport = transport.read().clone();

        spawn(async move {
            let indicator = spawn(run_indicator(
                move || conversation.with_mut(|chat| chat.rotate_status()),
                move || conversation.with_mut(|chat| chat.tick_elapsed()),
            ));

            let outcome = transport.0.send_message(&request.text, &request.model).await;

            indicator.cancel();
            conversation.with_mut(|chat| chat.settle(outcome, now_millis()));
        });
    };

    let (messages_snapshot, draft, pending, status_line) = conversation.with(|chat| {
        (
            chat.messages().to_vec(),
            chat.draft().to_string(),
            chat.is_pending(),
            chat.status_line(),
        )
    });
    let model_now = current_model();

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for msg in messages_snapshot {
                        MessageBubble { key: "{msg.id}", message: msg.clone() }
                    }
                    if pending {
                        div { class: "message-row assistant",
                            div { class: "bubble assistant pending",
                                div { class: "message-meta",
                                    "{format_clock(now_millis())} - {model_now}"
                                }
                                p { class: "shimmer-text", "{status_line}" }
                            }
                        }
                    }
                }
            }

            div { class: "composer no-divider",
                ModelSelector {
                    selected: model_now.clone(),
                    on_change: move |model: ModelType| current_model.set(model),
                }
                div { class: "composer-inner",
                    div { class: "hstack", style: "gap: 0.5rem; width: 100%; align-items: flex-end;",
                        input {
                            r#type: "text",
                            placeholder: "Skriv inn din beskjed...",
                            value: "{draft}",
                            oninput: move |ev| conversation.with_mut(|chat| chat.set_draft(ev.value())),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter {
                                    ev.prevent_default();
                                    send_message();
                                }
                            },
                            autofocus: true,
                        }
                        button {
                            class: "btn btn-primary", r#type: "button",
                            disabled: pending,
                            onclick: move |_| send_message(),
                            if pending { "Sender..." } else { "Send" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let side = if message.is_user { "user" } else { "assistant" };
    rsx! {
        div { class: "message-row {side}",
            div { class: "bubble {side}",
                div { class: "message-meta",
                    span { class: "message-timestamp", "{format_clock(message.timestamp)}" }
                    " - {message.model}"
                }
                MarkdownBody { text: message.text.clone() }
            }
        }
    }
}
