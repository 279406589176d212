use crate::markdown::{CodeBlock, Segment, render_segments};
use crate::views::shared::{CopyFeedback, copy_to_clipboard, revert_after_feedback};
use dioxus::prelude::*;

/// Markdown body of one message, with fenced blocks pulled out into
/// `CodeBlockView`s.
#[component]
pub fn MarkdownBody(text: String) -> Element {
    let segments = render_segments(&text)
        .into_iter()
        .enumerate()
        .map(|(i, segment)| match segment {
            Segment::Html(html) => rsx! {
                div { key: "{i}", dangerous_inner_html: "{html}" }
            },
            Segment::Code(block) => rsx! {
                CodeBlockView { key: "{i}", block }
            },
        });

    rsx! {
        div { class: "md", {segments} }
    }
}

#[component]
pub fn CodeBlockView(block: CodeBlock) -> Element {
    let mut feedback = use_signal(CopyFeedback::default);

    let payload = block.copy_text().to_string();
    let on_copy = move |_| {
        if !copy_to_clipboard(payload.clone()) {
            return;
        }
        let token = feedback.with_mut(|state| state.mark_copied());
        spawn(revert_after_feedback(move || {
            feedback.with_mut(|state| state.revert(token))
        }));
    };

    rsx! {
        div { class: "code-block",
            div { class: "code-header",
                span { class: "code-language", "{block.label()}" }
                button {
                    class: "action-btn",
                    r#type: "button",
                    title: "Copy code",
                    onclick: on_copy,
                    "{feedback.read().label()}"
                }
            }
            div { class: "code-body", dangerous_inner_html: "{block.html}" }
        }
    }
}
