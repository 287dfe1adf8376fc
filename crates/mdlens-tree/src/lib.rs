//! Document tree model shared across mdlens crates.
//!
//! Provides the [`Node`] element tree that the renderer builds from markdown
//! and rewrites into visible-syntax form, plus [`to_html`] serialization.
//!
//! The tree follows the element-tree convention for mixed content: a node
//! owns its leading text and its children, and text between a child and the
//! next sibling lives on the child as its `tail`. Rewrites that move a node
//! therefore carry its trailing text along unless they deliberately reattach
//! it.
//!
//! # Example
//!
//! ```
//! use mdlens_tree::{to_html, Node, NodeKind};
//!
//! let doc = Node::new(NodeKind::Document).with_child(
//!     Node::new(NodeKind::Paragraph)
//!         .with_text("see ")
//!         .with_child(Node::new(NodeKind::Code).with_text("to_html").with_tail(".")),
//! );
//! assert_eq!(to_html(&doc), "<p>see <code>to_html</code>.</p>");
//! ```

mod html;
mod node;

pub use html::{escape_html, to_html};
pub use node::{Node, NodeKind};
