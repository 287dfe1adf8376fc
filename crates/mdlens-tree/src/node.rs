//! Document tree node model.
//!
//! An element tree in the HTML shape: each node carries a kind, attributes,
//! leading text, owned children, and a tail. The tail is text that sits
//! between the node's closing tag and its next sibling, so mixed content
//! like `a <em>b</em> c` round-trips without synthetic text nodes.

use std::collections::BTreeMap;

/// Element kind of a document tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Document root. Serializes its contents with no enclosing tag.
    Document,
    /// Heading with level 1-6.
    Heading(u8),
    Paragraph,
    Blockquote,
    /// List container; `ordered` selects `<ol>` over `<ul>`.
    List {
        ordered: bool,
    },
    Item,
    Emphasis,
    Strong,
    Code,
    Link,
    Image,
    LineBreak,
    ThematicBreak,
    /// Raw HTML from the parser. Text serializes verbatim, unescaped.
    RawHtml,
    Div,
    Span,
}

impl NodeKind {
    /// HTML tag name, or `None` for kinds without one.
    #[must_use]
    pub fn tag_name(self) -> Option<&'static str> {
        match self {
            Self::Document | Self::RawHtml => None,
            Self::Heading(level) => Some(match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            }),
            Self::Paragraph => Some("p"),
            Self::Blockquote => Some("blockquote"),
            Self::List { ordered: true } => Some("ol"),
            Self::List { ordered: false } => Some("ul"),
            Self::Item => Some("li"),
            Self::Emphasis => Some("em"),
            Self::Strong => Some("strong"),
            Self::Code => Some("code"),
            Self::Link => Some("a"),
            Self::Image => Some("img"),
            Self::LineBreak => Some("br"),
            Self::ThematicBreak => Some("hr"),
            Self::Div => Some("div"),
            Self::Span => Some("span"),
        }
    }

    /// Whether the kind serializes as a void element (no closing tag).
    #[must_use]
    pub fn is_void(self) -> bool {
        matches!(self, Self::Image | Self::LineBreak | Self::ThematicBreak)
    }
}

/// A node in the document tree.
///
/// Children are owned by value: moving a node into a new structure detaches
/// it from the old one, so a tree can never alias or cycle.
///
/// # Example
///
/// ```
/// use mdlens_tree::{Node, NodeKind};
///
/// let para = Node::new(NodeKind::Paragraph)
///     .with_text("before ")
///     .with_child(Node::new(NodeKind::Emphasis).with_text("mid").with_tail(" after"));
/// assert_eq!(para.plain_text(), "before mid after");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Element kind.
    pub kind: NodeKind,
    /// Attributes, sorted by name so serialization is deterministic.
    pub attrs: BTreeMap<String, String>,
    /// Text before the first child.
    pub text: String,
    /// Text after this node's closing tag, before the next sibling.
    pub tail: String,
    /// Child nodes in document order.
    pub children: Vec<Node>,
    /// Set once a rewrite pass has restructured this node.
    #[cfg_attr(feature = "serde", serde(skip))]
    rewritten: bool,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
            text: String::new(),
            tail: String::new(),
            children: Vec::new(),
            rewritten: false,
        }
    }

    /// Set the leading text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the tail text.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attrs.insert("class".to_owned(), class.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The `class` attribute value.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    /// Whether a rewrite pass already restructured this node.
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        self.rewritten
    }

    /// Record that a rewrite pass restructured this node.
    pub fn mark_rewritten(&mut self) {
        self.rewritten = true;
    }

    /// All visible text in document order: own text, then each child's
    /// text recursively followed by that child's tail.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }
}
