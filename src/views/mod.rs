pub mod chat;
pub mod code_block;
pub mod model_selector;
pub mod shared;

pub use chat::ChatView;
pub use code_block::{CodeBlockView, MarkdownBody};
pub use model_selector::ModelSelector;
