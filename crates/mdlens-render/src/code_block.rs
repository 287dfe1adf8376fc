//! Code block extraction with deferred HTML insertion.
//!
//! Highlighted code is real markup and must not pass through tree
//! serialization, which escapes node text. Extracted blocks are therefore
//! stashed out of band: the tree keeps an opaque token where the block was,
//! and the stashed HTML is swapped in after the document is serialized.

use std::collections::HashMap;

use crate::guides::annotate_indent_guides;
use crate::highlight::Highlighter;

/// Delimiter on both ends of every placeholder token.
///
/// U+E000 is a private-use character. It passes through HTML escaping
/// unchanged, and no markup the serializer emits can produce it, so a full
/// token in serialized output can only come from this map.
const TOKEN_DELIMITER: char = '\u{e000}';

/// Token prefix up to the counter digits.
const TOKEN_PREFIX: &str = "\u{e000}codeblock:";

/// Stash of generated HTML keyed by opaque placeholder token.
///
/// One map lives per conversion run with its own monotonic counter, so
/// tokens are unique within a run and runs share nothing. [`apply`](Self::apply)
/// consumes the map: substitution happens exactly once.
#[derive(Debug, Default)]
pub struct PlaceholderMap {
    entries: HashMap<String, String>,
    counter: usize,
}

impl PlaceholderMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash `html` under a freshly allocated token and return the token.
    pub fn insert(&mut self, html: String) -> String {
        let token = format!("{TOKEN_PREFIX}{}{TOKEN_DELIMITER}", self.counter);
        self.counter += 1;
        self.entries.insert(token.clone(), html);
        token
    }

    /// Check if any blocks are stashed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stashed blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Swap every stashed token in `html` for its HTML in a single pass.
    ///
    /// Consumes the map to prevent a second substitution pass. A token
    /// prefix still present afterwards is a programming error (a stashed
    /// block whose token never reached the serialized tree, or vice versa)
    /// and trips a debug assertion.
    pub fn apply(self, html: &mut String) {
        if self.entries.is_empty() {
            return;
        }

        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();
        while let Some(start) = remaining.find(TOKEN_PREFIX) {
            result.push_str(&remaining[..start]);
            let candidate = &remaining[start..];
            // The token runs through the next delimiter after the prefix.
            match candidate[TOKEN_PREFIX.len()..].find(TOKEN_DELIMITER) {
                Some(end) => {
                    let token_len = TOKEN_PREFIX.len() + end + TOKEN_DELIMITER.len_utf8();
                    let token = &candidate[..token_len];
                    match self.entries.get(token) {
                        Some(replacement) => result.push_str(replacement),
                        None => result.push_str(token),
                    }
                    remaining = &candidate[token_len..];
                }
                None => {
                    result.push_str(candidate);
                    remaining = "";
                }
            }
        }
        result.push_str(remaining);

        debug_assert!(
            !result.contains(TOKEN_PREFIX),
            "placeholder token survived substitution"
        );
        *html = result;
    }
}

/// Extracts one code block at a time: highlight, annotate, stash.
pub struct CodeBlockExtractor<'a> {
    highlighter: &'a dyn Highlighter,
    placeholders: &'a mut PlaceholderMap,
}

impl<'a> CodeBlockExtractor<'a> {
    /// Create an extractor writing into `placeholders`.
    pub fn new(highlighter: &'a dyn Highlighter, placeholders: &'a mut PlaceholderMap) -> Self {
        Self {
            highlighter,
            placeholders,
        }
    }

    /// Highlight `source`, add indent guides, stash the finished HTML, and
    /// return the placeholder token to plant in the tree.
    pub fn extract(&mut self, source: &str, language: Option<&str>) -> String {
        let highlighted = self.highlighter.highlight(source, language);
        let annotated = annotate_indent_guides(&highlighted);
        self.placeholders.insert(annotated)
    }
}
