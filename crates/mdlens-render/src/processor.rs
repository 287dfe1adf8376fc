//! Tree processor trait for post-parse document rewriting.
//!
//! Processors are handed the parsed document tree and may restructure it
//! freely before serialization. A processor that stashes generated HTML
//! outside the tree (so the serializer's escaping cannot touch it) reinserts
//! that HTML in [`post_process`](TreeProcessor::post_process), which runs on
//! the serialized document.
//!
//! # Example
//!
//! ```
//! use mdlens_render::TreeProcessor;
//! use mdlens_tree::{Node, NodeKind};
//!
//! struct ClassTagger;
//!
//! impl TreeProcessor for ClassTagger {
//!     fn run(&mut self, root: &mut Node) {
//!         for child in &mut root.children {
//!             if child.kind == NodeKind::Paragraph {
//!                 child.set_attr("class", "tagged");
//!             }
//!         }
//!     }
//! }
//! ```

use mdlens_tree::Node;

/// A post-parse pass over the document tree.
pub trait TreeProcessor {
    /// Rewrite the tree in place.
    fn run(&mut self, root: &mut Node);

    /// Replace any stashed placeholders in the serialized HTML.
    ///
    /// Called once per conversion after serialization.
    /// Default implementation is a no-op.
    fn post_process(&mut self, _html: &mut String) {}

    /// Warnings generated while processing.
    ///
    /// Default implementation returns an empty slice.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdlens_tree::NodeKind;

    struct MinimalProcessor;

    impl TreeProcessor for MinimalProcessor {
        fn run(&mut self, _root: &mut Node) {}
    }

    #[test]
    fn test_default_trait_implementations() {
        let mut processor = MinimalProcessor;
        let mut root = Node::new(NodeKind::Document);
        processor.run(&mut root);

        let mut html = "unchanged".to_owned();
        processor.post_process(&mut html);
        assert_eq!(html, "unchanged");
        assert!(processor.warnings().is_empty());
    }
}
