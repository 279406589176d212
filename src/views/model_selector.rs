use crate::types::ModelType;
use dioxus::prelude::*;

/// Controlled model picker: a drop-down on narrow screens and a radio row on
/// wide ones. The stylesheet hides whichever does not fit the viewport.
#[component]
pub fn ModelSelector(selected: ModelType, on_change: EventHandler<ModelType>) -> Element {
    let options = ModelType::SELECTABLE.into_iter().map(|model| {
        let id = model.id().to_string();
        rsx! {
            option {
                key: "{id}",
                value: "{id}",
                selected: model == selected,
                "{model.display_name()}"
            }
        }
    });

    let radios = ModelType::SELECTABLE.into_iter().map(|model| {
        let id = model.id().to_string();
        let name = model.display_name().to_string();
        let is_checked = model == selected;
        rsx! {
            label {
                key: "{id}",
                class: format_args!("model-option {}", if is_checked { "active" } else { "" }),
                input {
                    r#type: "radio",
                    name: "model",
                    value: "{id}",
                    checked: is_checked,
                    onchange: move |_| on_change.call(model.clone()),
                }
                span { "{name}" }
            }
        }
    });

    rsx! {
        div { class: "model-selector model-selector-compact",
            select {
                value: "{selected.id()}",
                onchange: move |evt: FormEvent| {
                    if let Some(model) = ModelType::from_id(&evt.value()) {
                        on_change.call(model);
                    }
                },
                {options}
            }
        }
        div { class: "model-selector model-selector-wide", {radios} }
    }
}
