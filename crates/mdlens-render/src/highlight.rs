//! Syntax highlighter capability.

use mdlens_tree::escape_html;

/// Converts raw code into span-annotated HTML.
///
/// Implementations must be infallible: an unknown language, a failed guess
/// or a lexer error degrades to escaped plain text rather than surfacing an
/// error. One input line must map to one output line, with markup never
/// spanning a line break, so the indent-guide pass can split on `\n`.
pub trait Highlighter {
    /// Highlight `source`, optionally guided by a language hint taken from
    /// the fence info string (e.g. `"python"`).
    ///
    /// With no hint the implementation may guess from the content.
    fn highlight(&self, source: &str, language: Option<&str>) -> String;
}

/// Fallback highlighter that escapes the source and adds no token classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, source: &str, _language: Option<&str>) -> String {
        escape_html(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_escapes() {
        let out = PlainHighlighter.highlight("if a < b { }", Some("rust"));
        assert_eq!(out, "if a &lt; b { }");
    }

    #[test]
    fn test_plain_highlighter_keeps_newlines() {
        let out = PlainHighlighter.highlight("one\ntwo\n", None);
        assert_eq!(out, "one\ntwo\n");
    }
}
