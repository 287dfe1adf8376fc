//! Builds a document tree from pulldown-cmark events.

use mdlens_tree::{Node, NodeKind};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Parse markdown text into a document tree.
///
/// Uses the CommonMark core feature set (no GFM extensions), matching the
/// constructs the visible-syntax rewrite understands.
#[must_use]
pub fn parse_document(markdown: &str) -> Node {
    build_tree(Parser::new_ext(markdown, Options::empty()))
}

/// Assemble a document tree from a markdown event stream.
///
/// Fenced and indented code blocks come out as a paragraph wrapping a single
/// code node, the shape the rewrite pass recognizes as a code block; the
/// fence language lands on the code node as a `language-*` class. Text that
/// follows a child element is attached to that child as its tail.
pub fn build_tree<'a, I>(events: I) -> Node
where
    I: Iterator<Item = Event<'a>>,
{
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.handle(event);
    }
    builder.finish()
}

struct TreeBuilder {
    /// Stack of open elements; index 0 is the document root.
    stack: Vec<Node>,
    /// Alt text buffer while inside an image tag.
    image_alt: Option<String>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document)],
            image_alt: None,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        if self.image_alt.is_some() {
            self.handle_in_image(event);
            return;
        }
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                self.push_child(Node::new(NodeKind::Code).with_text(code.to_string()));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_child(Node::new(NodeKind::RawHtml).with_text(html.to_string()));
            }
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => self.push_child(Node::new(NodeKind::LineBreak)),
            Event::Rule => self.push_child(Node::new(NodeKind::ThematicBreak)),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not produced with the options this crate enables.
            }
        }
    }

    /// Inside an image tag only the text matters; it becomes the alt
    /// attribute and nested markup is flattened.
    fn handle_in_image(&mut self, event: Event<'_>) {
        match event {
            Event::Text(text) | Event::Code(text) => {
                if let Some(alt) = &mut self.image_alt {
                    alt.push_str(&text);
                }
            }
            Event::End(TagEnd::Image) => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some(image) = self.stack.last_mut() {
                    image.set_attr("alt", alt);
                }
                self.close();
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(Node::new(NodeKind::Paragraph)),
            Tag::Heading { level, .. } => {
                self.open(Node::new(NodeKind::Heading(heading_level_to_num(level))));
            }
            Tag::BlockQuote(_) => self.open(Node::new(NodeKind::Blockquote)),
            Tag::CodeBlock(kind) => {
                let mut code = Node::new(NodeKind::Code);
                if let CodeBlockKind::Fenced(info) = &kind {
                    if let Some(lang) = fence_language(info) {
                        code.set_attr("class", format!("language-{lang}"));
                    }
                }
                self.open(Node::new(NodeKind::Paragraph));
                self.open(code);
            }
            Tag::List(start) => {
                let mut list = Node::new(NodeKind::List {
                    ordered: start.is_some(),
                });
                match start {
                    Some(n) if n != 1 => list.set_attr("start", n.to_string()),
                    _ => {}
                }
                self.open(list);
            }
            Tag::Item => self.open(Node::new(NodeKind::Item)),
            Tag::Emphasis => self.open(Node::new(NodeKind::Emphasis)),
            Tag::Strong => self.open(Node::new(NodeKind::Strong)),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Node::new(NodeKind::Link).with_attr("href", dest_url.to_string());
                if !title.is_empty() {
                    link.set_attr("title", title.to_string());
                }
                self.open(link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut image = Node::new(NodeKind::Image).with_attr("src", dest_url.to_string());
                if !title.is_empty() {
                    image.set_attr("title", title.to_string());
                }
                self.open(image);
                self.image_alt = Some(String::new());
            }
            _ => {
                // Extensions are disabled in the parser options; anything
                // that still arrives is treated as transparent.
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Link => self.close(),
            TagEnd::CodeBlock => {
                // Close the code node, then its wrapping paragraph.
                self.close();
                self.close();
            }
            _ => {}
        }
    }

    fn open(&mut self, node: Node) {
        self.stack.push(node);
    }

    fn close(&mut self) {
        // The root never closes; unbalanced end events are dropped.
        if self.stack.len() > 1 {
            if let Some(node) = self.stack.pop() {
                self.push_child(node);
            }
        }
    }

    fn push_child(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(parent) = self.stack.last_mut() {
            if let Some(last) = parent.children.last_mut() {
                last.tail.push_str(text);
            } else {
                parent.text.push_str(text);
            }
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document))
    }
}

/// Language token from a fence info string (first whitespace-separated word).
fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
