use comrak::arena_tree::Node;
use comrak::nodes::{Ast, AstNode, LineColumn, NodeValue};
use comrak::plugins::syntect::SyntectAdapter;
use comrak::{Arena, ComrakOptions, ComrakPlugins, format_html_with_plugins, parse_document};
use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::cell::RefCell;

const CLASS_PREFIX: &str = "language-";

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options
});

static LANGUAGE_CLASS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"language-(\w+)")
        .inspect_err(|err| tracing::error!(error = %err, "invalid language pattern"))
        .ok()
});

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Holds the place of a split-out fenced block while the document renders.
/// The parser turns NUL into U+FFFD, so message text cannot produce it.
const FENCE_MARKER: &str = "\u{0}fence\u{0}";

/// A piece of a rendered message body.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Rendered HTML for a run of ordinary blocks.
    Html(String),
    Code(CodeBlock),
}

/// A top-level fenced code block.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// Source text exactly as written between the fences.
    pub literal: String,
    /// Syntax-highlighted `<pre>` markup.
    pub html: String,
}

impl CodeBlock {
    pub fn label(&self) -> &str {
        self.language.as_deref().unwrap_or_default()
    }

    /// Text placed on the clipboard by the Copy control.
    pub fn copy_text(&self) -> &str {
        self.literal.strip_suffix('\n').unwrap_or(&self.literal)
    }
}

/// Class attribute the HTML renderer puts on a fenced block's `<code>`.
pub fn code_class(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| format!("{CLASS_PREFIX}{lang}"))
}

/// Pulls the word after `language-` out of a class attribute.
pub fn language_from_class(class: &str) -> Option<String> {
    let captures = (*LANGUAGE_CLASS).as_ref()?.captures(class).ok()??;
    captures.get(1).map(|lang| lang.as_str().to_string())
}

/// Splits a message body into HTML runs and top-level fenced code blocks.
///
/// The document is rendered in one pass so footnotes and other
/// document-wide output stay numbered across the whole message.
pub fn render_segments(md: &str) -> Vec<Segment> {
    let arena = Arena::new();
    let root = parse_document(&arena, md, &MARKDOWN_OPTIONS);
    let adapter = SyntectAdapter::new(Some(HIGHLIGHT_THEME));

    let mut blocks = Vec::new();
    let top_level: Vec<_> = root.children().collect();
    for node in top_level {
        let fenced = match &node.data.borrow().value {
            NodeValue::CodeBlock(block) if block.fenced => {
                Some((block.info.clone(), block.literal.clone()))
            }
            _ => None,
        };
        let Some((info, literal)) = fenced else {
            continue;
        };

        blocks.push(CodeBlock {
            language: code_class(&info).and_then(|class| language_from_class(&class)),
            literal,
            html: render_node(node, &adapter),
        });
        node.insert_before(marker_node(&arena));
        node.detach();
    }

    let html = render_node(root, &adapter);
    let placeholder = format!("<p>{FENCE_MARKER}</p>");
    let mut blocks = blocks.into_iter();
    let mut segments = Vec::new();
    for (i, run) in html.split(&placeholder).enumerate() {
        if i > 0 {
            segments.extend(blocks.next().map(Segment::Code));
        }
        if !run.trim().is_empty() {
            segments.push(Segment::Html(run.to_string()));
        }
    }
    segments
}

fn marker_node<'a>(arena: &'a Arena<AstNode<'a>>) -> &'a AstNode<'a> {
    let origin = LineColumn { line: 0, column: 0 };
    let paragraph: &'a AstNode<'a> =
        arena.alloc(Node::new(RefCell::new(Ast::new(NodeValue::Paragraph, origin))));
    let text: &'a AstNode<'a> = arena.alloc(Node::new(RefCell::new(Ast::new(
        NodeValue::Text(FENCE_MARKER.to_string()),
        origin,
    ))));
    paragraph.append(text);
    paragraph
}

fn render_node<'a>(node: &'a AstNode<'a>, adapter: &SyntectAdapter) -> String {
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(adapter);

    let mut out = Vec::new();
    if let Err(err) = format_html_with_plugins(node, &MARKDOWN_OPTIONS, &mut out, &plugins) {
        tracing::warn!(error = %err, "markdown rendering failed");
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_blocks(segments: &[Segment]) -> Vec<&CodeBlock> {
        segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Code(block) => Some(block),
                Segment::Html(_) => None,
            })
            .collect()
    }

    #[test]
    fn fenced_block_gets_language_and_copy_text() {
        let segments = render_segments("```js\nconsole.log(1)\n```");
        let blocks = code_blocks(&segments);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label(), "js");
        assert_eq!(blocks[0].copy_text(), "console.log(1)");
        assert!(blocks[0].html.contains("<pre"));
    }

    #[test]
    fn prose_around_code_is_kept_in_order() {
        let segments = render_segments("Intro\n\n```rust\nfn main() {}\n```\n\nOutro");
        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[0], Segment::Html(html) if html.contains("Intro")));
        assert!(matches!(&segments[1], Segment::Code(block) if block.label() == "rust"));
        assert!(matches!(&segments[2], Segment::Html(html) if html.contains("Outro")));
    }

    #[test]
    fn fence_without_info_has_no_language() {
        let segments = render_segments("```\nplain\n```");
        let blocks = code_blocks(&segments);
        assert_eq!(blocks[0].language, None);
        assert_eq!(blocks[0].label(), "");
    }

    #[test]
    fn inline_code_stays_inline() {
        let segments = render_segments("call `foo()` now");
        assert_eq!(segments.len(), 1);
        assert!(matches!(&segments[0], Segment::Html(html) if html.contains("<code>foo()</code>")));
    }

    #[test]
    fn renders_gfm_tables_and_strikethrough() {
        let segments = render_segments("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        let [Segment::Html(html)] = segments.as_slice() else {
            panic!("expected a single html run, got {segments:?}");
        };
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn footnotes_share_one_section() {
        let segments =
            render_segments("a[^1] b[^2]\n\n```sh\nls\n```\n\n[^1]: one\n[^2]: two\n");
        assert_eq!(code_blocks(&segments).len(), 1);

        let html: String = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Html(html) => Some(html.as_str()),
                Segment::Code(_) => None,
            })
            .collect();
        assert_eq!(html.matches("class=\"footnotes\"").count(), 1);
        assert!(html.contains("Back to reference 1\""));
        assert!(html.contains("Back to reference 2\""));
    }

    #[test]
    fn language_extraction_matches_word_characters() {
        assert_eq!(language_from_class("language-js"), Some("js".to_string()));
        assert_eq!(language_from_class("language-c++"), Some("c".to_string()));
        assert_eq!(language_from_class("hljs"), None);
        assert_eq!(language_from_class("language- language-js"), Some("js".to_string()));
        assert_eq!(language_from_class("language-"), None);
        assert_eq!(code_class("python title=demo"), Some("language-python".to_string()));
        assert_eq!(code_class("   "), None);
    }

    #[test]
    fn copy_text_strips_only_one_newline() {
        let block = CodeBlock {
            language: None,
            literal: "a\n\n".to_string(),
            html: String::new(),
        };
        assert_eq!(block.copy_text(), "a\n");
    }
}
