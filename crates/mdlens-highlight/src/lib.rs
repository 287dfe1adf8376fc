//! Syntect-backed highlighting for fenced code blocks.
//!
//! [`SyntectHighlighter`] implements [`mdlens_render::Highlighter`] on top
//! of the syntax definitions bundled with syntect. Output carries `syn-*`
//! CSS classes rather than inline colors, so the color scheme stays in the
//! stylesheet next to the markdown marker styles.
//!
//! # Example
//!
//! ```
//! use mdlens_highlight::SyntectHighlighter;
//! use mdlens_render::Highlighter;
//!
//! let html = SyntectHighlighter::new().highlight("x = 1\n", Some("python"));
//! assert!(html.contains("syn-number"));
//! ```

use std::fmt::Write as _;
use std::sync::LazyLock;

use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use mdlens_render::Highlighter;
use mdlens_tree::escape_html;

/// Bundled syntax definitions, loaded once on first use.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Scope prefixes mapped to output classes, most specific first.
///
/// A token takes the class of the first entry that prefixes its innermost
/// matching scope, so `keyword.operator` must sit above `keyword` and
/// `variable.language` above `variable`.
static SCOPE_CLASSES: LazyLock<Vec<(Scope, &'static str)>> = LazyLock::new(|| {
    [
        ("comment", "syn-comment"),
        ("string", "syn-string"),
        ("constant.numeric", "syn-number"),
        ("constant.language", "syn-constant"),
        ("keyword.operator", "syn-operator"),
        ("keyword", "syn-keyword"),
        ("storage", "syn-keyword"),
        ("entity.name.function", "syn-function"),
        ("entity.name.class", "syn-class"),
        ("entity.name.type", "syn-class"),
        ("support", "syn-builtin"),
        ("variable.language", "syn-builtin"),
        ("variable", "syn-variable"),
    ]
    .into_iter()
    .map(|(prefix, class)| (Scope::new(prefix).unwrap(), class))
    .collect()
});

/// Highlighter backed by syntect's bundled syntax definitions.
///
/// Highlighting never fails: an unknown language hint falls back to
/// first-line detection and then to plain text, and a line that syntect
/// cannot parse comes through escaped but unclassed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, source: &str, language: Option<&str>) -> String {
        let syntax = resolve_syntax(source, language);
        let mut parse_state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut out = String::with_capacity(source.len() * 2);

        for line in LinesWithEndings::from(source) {
            let ops = match parse_state.parse_line(line, &SYNTAX_SET) {
                Ok(ops) => ops,
                Err(err) => {
                    tracing::debug!(error = %err, "scope parse failed, emitting line unclassed");
                    Vec::new()
                }
            };

            let ended_with_newline = line.ends_with('\n');
            let text = line.strip_suffix('\n').unwrap_or(line);
            let mut cursor = 0;
            for (offset, op) in &ops {
                // Offsets can point at the stripped newline.
                let offset = (*offset).min(text.len());
                if offset > cursor {
                    emit_segment(&mut out, &text[cursor..offset], scope_class(&stack));
                    cursor = offset;
                }
                if let Err(err) = stack.apply(op) {
                    tracing::debug!(error = %err, "scope stack rejected operation");
                }
            }
            if cursor < text.len() {
                emit_segment(&mut out, &text[cursor..], scope_class(&stack));
            }
            if ended_with_newline {
                out.push('\n');
            }
        }

        out
    }
}

/// Pick a syntax definition for the block.
fn resolve_syntax(source: &str, language: Option<&str>) -> &'static SyntaxReference {
    if let Some(token) = language {
        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(token) {
            return syntax;
        }
        tracing::debug!(language = token, "no syntax definition for language hint");
    }
    let first_line = source.lines().next().unwrap_or("");
    SYNTAX_SET
        .find_syntax_by_first_line(first_line)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

/// Class for the innermost scope with a table entry.
fn scope_class(stack: &ScopeStack) -> Option<&'static str> {
    for scope in stack.as_slice().iter().rev() {
        for (prefix, class) in SCOPE_CLASSES.iter().copied() {
            if prefix.is_prefix_of(*scope) {
                return Some(class);
            }
        }
    }
    None
}

fn emit_segment(out: &mut String, text: &str, class: Option<&'static str>) {
    if text.is_empty() {
        return;
    }
    match class {
        Some(class) => {
            write!(out, r#"<span class="{class}">{}</span>"#, escape_html(text)).unwrap();
        }
        None => out.push_str(&escape_html(text)),
    }
}

#[cfg(test)]
mod tests {
    use mdlens_render::Converter;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_python_strings_and_comments_are_classed() {
        let html = SyntectHighlighter::new().highlight("x = \"hi\"  # note\n", Some("python"));
        assert!(html.contains("syn-string"));
        assert!(html.contains("syn-comment"));
        assert!(html.contains("note"));
    }

    #[test]
    fn test_unknown_language_does_not_panic() {
        let html = SyntectHighlighter::new().highlight("total: 12\n", Some("nosuchlang"));
        assert!(html.contains("total: 12"));
    }

    #[test]
    fn test_first_line_detection_without_hint() {
        let html = SyntectHighlighter::new().highlight("#!/bin/sh\necho hi\n", None);
        assert!(html.contains("echo"));
    }

    #[test]
    fn test_plain_text_comes_through_unclassed() {
        let html = SyntectHighlighter::new().highlight("just words\n", None);
        assert_eq!(html, "just words\n");
    }

    #[test]
    fn test_markup_in_source_is_escaped() {
        let html = SyntectHighlighter::new().highlight("a <b> & c\n", None);
        assert_eq!(html, "a &lt;b&gt; &amp; c\n");
    }

    #[test]
    fn test_line_structure_is_preserved() {
        let source = "def f():\n    return 1\n";
        let html = SyntectHighlighter::new().highlight(source, Some("python"));
        assert_eq!(html.split('\n').count(), source.split('\n').count());
        assert!(html.contains("syn-keyword"));
    }

    #[test]
    fn test_multiline_string_keeps_class_on_both_lines() {
        let source = "s = \"\"\"first\nsecond\"\"\"\n";
        let html = SyntectHighlighter::new().highlight(source, Some("python"));
        let lines: Vec<&str> = html.split('\n').collect();
        assert!(lines[0].contains("syn-string"));
        assert!(lines[1].contains("syn-string"));
    }

    #[test]
    fn test_source_without_trailing_newline() {
        let html = SyntectHighlighter::new().highlight("just words", None);
        assert_eq!(html, "just words");
    }

    #[test]
    fn test_full_pipeline_highlights_fenced_block() {
        let markdown = "```python\ndef f():\n    return 1\n```";
        let result = Converter::new()
            .with_highlighter(SyntectHighlighter::new())
            .convert(markdown);
        assert!(result.html.contains(r#"<div class="md-codeblock">"#));
        assert_eq!(result.html.matches("md-codeblock-indent").count(), 1);
        assert!(result.html.contains("syn-keyword"));
        assert!(!result.html.contains('\u{e000}'));
    }
}
