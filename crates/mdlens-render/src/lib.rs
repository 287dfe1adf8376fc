//! Markdown-to-HTML conversion that keeps the markdown syntax visible.
//!
//! This crate turns markdown source into HTML in which the original
//! punctuation (`#`, `*`, `` ` ``, `>`, list bullets) survives as styled
//! spans, so the rendered page still reads like marked-up plain text.
//!
//! # Architecture
//!
//! Conversion runs in four stages:
//! - [`parse_document`] builds a [`mdlens_tree::Node`] tree from
//!   pulldown-cmark events
//! - [`VisibleSyntaxProcessor`] rewrites the tree bottom-up, wrapping
//!   each markdown construct in marker and content spans and swapping
//!   code-block paragraphs for placeholder tokens
//! - [`mdlens_tree::to_html`] serializes the rewritten tree, escaping all
//!   text content
//! - post-processing substitutes the stashed code-block HTML (highlighted
//!   via a [`Highlighter`] and annotated with indent guides) back in place
//!   of the tokens
//!
//! [`Converter`] drives the whole pipeline; extra [`TreeProcessor`]
//! implementations can hook in after the visible-syntax pass.
//!
//! # Example
//!
//! ```
//! use mdlens_render::Converter;
//!
//! let result = Converter::new().convert("# Hello\n\nSome *emphasis*.");
//! assert!(result.html.contains(r#"<span class="md-hash">#</span> Hello"#));
//! assert!(result.html.contains(r#"<span class="md-italic">emphasis</span>"#));
//! ```

mod builder;
mod code_block;
mod guides;
mod highlight;
mod pipeline;
mod processor;
mod rewrite;
mod template;

pub use builder::{build_tree, parse_document};
pub use code_block::{CodeBlockExtractor, PlaceholderMap};
pub use guides::annotate_indent_guides;
pub use highlight::{Highlighter, PlainHighlighter};
pub use pipeline::{ConvertResult, Converter};
pub use processor::TreeProcessor;
pub use rewrite::{VisibleSyntaxProcessor, wrap_inline};
pub use template::{Template, TemplateError};
