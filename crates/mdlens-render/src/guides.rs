//! Indent guides for highlighted code.
//!
//! Wraps each line of highlighted code in a line container and plants a
//! zero-width guide marker at every fourth indentation column, positioned in
//! `em` units so the style sheet can draw vertical rules under the code.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

/// Regex to match markup tags, so indentation is measured on visible text.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Columns per indentation level.
const INDENT_WIDTH: usize = 4;

/// Horizontal advance of one column in tenths of an `em` (0.6em per column).
const COLUMN_EM_TENTHS: usize = 6;

/// Wrap each line of `html` in a `md-codeblock-line` container with a
/// `md-codeblock-indent` marker per four leading columns.
///
/// Markup tags are stripped before counting leading spaces, so spans opened
/// around the indentation do not shift the guides. Line separators stay
/// outside the containers; an empty line becomes an empty container.
///
/// # Example
///
/// ```
/// use mdlens_render::annotate_indent_guides;
///
/// let out = annotate_indent_guides("    x");
/// assert_eq!(
///     out,
///     "<div class=\"md-codeblock-line\">\
///      <span class=\"md-codeblock-indent\" style=\"left: 2.4em;\"></span>    x</div>"
/// );
/// ```
#[must_use]
pub fn annotate_indent_guides(html: &str) -> String {
    let lines: Vec<String> = html.split('\n').map(annotate_line).collect();
    lines.join("\n")
}

fn annotate_line(line: &str) -> String {
    let visible = TAG_RE.replace_all(line, "");
    let indent = visible.len() - visible.trim_start_matches(' ').len();

    let mut out = String::with_capacity(line.len() + 64);
    out.push_str(r#"<div class="md-codeblock-line">"#);
    let mut column = INDENT_WIDTH;
    while column <= indent {
        let tenths = column * COLUMN_EM_TENTHS;
        write!(
            out,
            r#"<span class="md-codeblock-indent" style="left: {}.{}em;"></span>"#,
            tenths / 10,
            tenths % 10
        )
        .unwrap();
        column += INDENT_WIDTH;
    }
    out.push_str(line);
    out.push_str("</div>");
    out
}
