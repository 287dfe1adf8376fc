//! HTML serialization for document trees.

use std::fmt::Write;

use crate::node::{Node, NodeKind};

/// Serialize a tree to an HTML fragment.
///
/// A [`NodeKind::Document`] root emits its contents with no enclosing tag.
/// Text, tails and attribute values are escaped; [`NodeKind::RawHtml`] text
/// passes through verbatim.
///
/// # Example
///
/// ```
/// use mdlens_tree::{to_html, Node, NodeKind};
///
/// let para = Node::new(NodeKind::Paragraph)
///     .with_text("a ")
///     .with_child(Node::new(NodeKind::Emphasis).with_text("b").with_tail(" c"));
/// assert_eq!(to_html(&para), "<p>a <em>b</em> c</p>");
/// ```
#[must_use]
pub fn to_html(node: &Node) -> String {
    let mut out = String::with_capacity(256);
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    let Some(tag) = node.kind.tag_name() else {
        if node.kind == NodeKind::RawHtml {
            out.push_str(&node.text);
        } else {
            write_contents(node, out);
        }
        return;
    };

    out.push('<');
    out.push_str(tag);
    for (name, value) in &node.attrs {
        write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
    }
    out.push('>');
    if node.kind.is_void() {
        return;
    }
    write_contents(node, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_contents(node: &Node, out: &mut String) {
    out.push_str(&escape_html(&node.text));
    for child in &node.children {
        write_node(child, out);
        out.push_str(&escape_html(&child.tail));
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
