//! Visible-syntax rewriting of parsed documents.
//!
//! Restructures a markdown document tree so the serialized HTML shows the
//! original markdown punctuation alongside the rendered formatting: heading
//! hashes, blockquote markers, list bullets and emphasis delimiters each get
//! a dedicated styled span next to the content they used to mark up. Code
//! blocks leave the tree entirely through the placeholder pipeline in
//! [`crate::code_block`] and come back after serialization, fully
//! highlighted and annotated.
//!
//! Rules are checked per node and are mutually exclusive. The code-paragraph
//! rule runs before descending into a subtree; all other rules run after the
//! node's children have been processed, so inner structures are already in
//! their final shape when an outer rule fires.

use mdlens_tree::{Node, NodeKind};

use crate::code_block::{CodeBlockExtractor, PlaceholderMap};
use crate::highlight::Highlighter;
use crate::processor::TreeProcessor;

/// Rewrites a document tree into visible-syntax form.
///
/// Construct one per document run: the placeholder stash and its counter
/// belong to the processor, and [`TreeProcessor::post_process`] consumes
/// them when it reinserts the extracted code blocks.
///
/// # Example
///
/// ```
/// use mdlens_render::{parse_document, VisibleSyntaxProcessor};
/// use mdlens_tree::to_html;
///
/// let mut doc = parse_document("# Hi");
/// VisibleSyntaxProcessor::new().rewrite(&mut doc);
/// assert!(to_html(&doc).contains(r##"<span class="md-hash">#</span> Hi"##));
/// ```
pub struct VisibleSyntaxProcessor<'a> {
    highlighter: Option<&'a dyn Highlighter>,
    placeholders: PlaceholderMap,
}

impl<'a> VisibleSyntaxProcessor<'a> {
    /// Create a processor without highlighting.
    ///
    /// Code blocks stay in the tree as ordinary `<p><code>` structures and
    /// only the structural markers are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlighter: None,
            placeholders: PlaceholderMap::new(),
        }
    }

    /// Attach the highlighter used for code blocks.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a dyn Highlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Number of code blocks extracted so far.
    #[must_use]
    pub fn extracted_blocks(&self) -> usize {
        self.placeholders.len()
    }

    /// Rewrite the tree rooted at `root` in place.
    ///
    /// Returns the same tree for chaining into serialization.
    pub fn rewrite<'t>(&mut self, root: &'t mut Node) -> &'t mut Node {
        self.process_node(root);
        root
    }

    fn process_node(&mut self, node: &mut Node) {
        // A paragraph wrapping a single code node is a code block. It is
        // consumed wholesale; its subtree is never descended into.
        if is_code_paragraph(node) {
            self.process_code_paragraph(node);
            return;
        }

        for child in &mut node.children {
            self.process_node(child);
        }

        match node.kind {
            NodeKind::Heading(level) => rewrite_heading(node, level),
            NodeKind::Blockquote => quote_paragraphs(node),
            NodeKind::List { ordered } => rewrite_list(node, ordered),
            NodeKind::Emphasis => wrap_inline(node, "*", "*", "md-asterisk", "md-italic"),
            NodeKind::Strong => wrap_inline(node, "**", "**", "md-double-asterisk", "md-bold"),
            NodeKind::Code => wrap_inline(node, "`", "`", "md-backtick", "md-code"),
            _ => {}
        }
    }

    /// Extract a code paragraph through the placeholder pipeline.
    ///
    /// Without a highlighter, or when the code is blank, the paragraph is
    /// left as an ordinary rendered code block.
    fn process_code_paragraph(&mut self, node: &mut Node) {
        let Some(highlighter) = self.highlighter else {
            return;
        };
        let Some(code) = node.children.first() else {
            return;
        };
        let source = code.plain_text();
        if source.trim().is_empty() {
            return;
        }
        let language = language_hint(code);

        let token = CodeBlockExtractor::new(highlighter, &mut self.placeholders)
            .extract(&source, language.as_deref());
        tracing::debug!(
            language = language.as_deref().unwrap_or("auto"),
            bytes = source.len(),
            "extracted code block"
        );

        let tail = std::mem::take(&mut node.tail);
        *node = Node::new(NodeKind::Div)
            .with_class("md-codeblock")
            .with_text(token)
            .with_tail(tail);
    }
}

impl Default for VisibleSyntaxProcessor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeProcessor for VisibleSyntaxProcessor<'_> {
    fn run(&mut self, root: &mut Node) {
        self.rewrite(root);
    }

    fn post_process(&mut self, html: &mut String) {
        std::mem::take(&mut self.placeholders).apply(html);
    }
}

/// A paragraph whose whole content is one code node.
///
/// Leading paragraph text or a tail on the code node means the code is
/// inline content, not a block.
fn is_code_paragraph(node: &Node) -> bool {
    if node.kind != NodeKind::Paragraph || !node.text.is_empty() {
        return false;
    }
    match node.children.as_slice() {
        [child] => child.kind == NodeKind::Code && child.tail.is_empty(),
        _ => false,
    }
}

/// Language name from a `language-*` class token on a code node.
fn language_hint(code: &Node) -> Option<String> {
    code.attr("class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .map(str::to_owned)
}

/// Replace a heading with a container that shows its hash marker.
///
/// `## Title` becomes a `md-heading` div holding a `md-hash` span with the
/// hashes, one space, and then the original heading content.
fn rewrite_heading(node: &mut Node, level: u8) {
    let text = std::mem::take(&mut node.text);
    let children = std::mem::take(&mut node.children);
    let tail = std::mem::take(&mut node.tail);

    let marker = Node::new(NodeKind::Span)
        .with_class("md-hash")
        .with_text("#".repeat(usize::from(level)))
        .with_tail(format!(" {text}"));

    let mut container = Node::new(NodeKind::Div)
        .with_class("md-heading")
        .with_tail(tail)
        .with_child(marker);
    container.children.extend(children);
    *node = container;
}

/// Give every paragraph under a blockquote a `>` marker.
///
/// Children are processed before their parents, so paragraphs inside a
/// nested blockquote have already been consumed by the inner quote and each
/// paragraph ends up with exactly one marker.
fn quote_paragraphs(node: &mut Node) {
    for child in &mut node.children {
        if child.kind == NodeKind::Paragraph {
            let text = std::mem::take(&mut child.text);
            let children = std::mem::take(&mut child.children);
            let tail = std::mem::take(&mut child.tail);

            let marker = Node::new(NodeKind::Span)
                .with_class("md-quote-marker")
                .with_text(">")
                .with_tail(" ");
            let mut content = Node::new(NodeKind::Span)
                .with_class("md-quote-text")
                .with_text(text);
            content.children = children;

            *child = Node::new(NodeKind::Div)
                .with_class("md-blockquote")
                .with_tail(tail)
                .with_child(marker)
                .with_child(content);
        } else {
            quote_paragraphs(child);
        }
    }
}

/// Tag a list container and give each item a bullet or number marker.
///
/// The rewritten flag on the container and on each item keeps a repeated
/// pass from stacking duplicate markers.
fn rewrite_list(node: &mut Node, ordered: bool) {
    if node.is_rewritten() {
        return;
    }
    node.mark_rewritten();
    node.set_attr("class", "md-list");

    let mut index = 0usize;
    for child in &mut node.children {
        if child.kind != NodeKind::Item {
            continue;
        }
        index += 1;
        if child.is_rewritten() {
            continue;
        }
        child.mark_rewritten();
        child.set_attr("class", "md-list-item");

        let marker = if ordered {
            Node::new(NodeKind::Span)
                .with_class("md-number")
                .with_text(format!("{index}."))
        } else {
            Node::new(NodeKind::Span).with_class("md-bullet").with_text("*")
        };
        // The marker absorbs the item's leading text into its tail so the
        // text stays right after the bullet.
        let text = std::mem::take(&mut child.text);
        let marker = marker.with_tail(format!(" {text}"));
        child.children.insert(0, marker);
    }
}

/// Restructure an inline node into marker, content and marker spans.
///
/// The node keeps its slot; its text and children move into the content
/// span and its tail moves onto the closing marker, so adjacent text
/// concatenates exactly as before.
///
/// # Example
///
/// ```
/// use mdlens_render::wrap_inline;
/// use mdlens_tree::{to_html, Node, NodeKind};
///
/// let mut node = Node::new(NodeKind::Emphasis).with_text("term").with_tail("!");
/// wrap_inline(&mut node, "*", "*", "md-asterisk", "md-italic");
/// assert_eq!(
///     to_html(&node),
///     "<span><span class=\"md-asterisk\">*</span>\
///      <span class=\"md-italic\">term</span>\
///      <span class=\"md-asterisk\">*</span>!</span>"
/// );
/// ```
pub fn wrap_inline(
    node: &mut Node,
    prefix: &str,
    suffix: &str,
    marker_class: &str,
    content_class: &str,
) {
    let text = std::mem::take(&mut node.text);
    let children = std::mem::take(&mut node.children);
    let tail = std::mem::take(&mut node.tail);

    let opening = Node::new(NodeKind::Span).with_class(marker_class).with_text(prefix);
    let mut content = Node::new(NodeKind::Span).with_class(content_class).with_text(text);
    content.children = children;
    let closing = Node::new(NodeKind::Span)
        .with_class(marker_class)
        .with_text(suffix)
        .with_tail(tail);

    *node = Node::new(NodeKind::Span)
        .with_child(opening)
        .with_child(content)
        .with_child(closing);
}
