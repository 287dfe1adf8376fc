//! Document conversion pipeline.

use mdlens_tree::to_html;

use crate::builder::parse_document;
use crate::highlight::Highlighter;
use crate::processor::TreeProcessor;
use crate::rewrite::VisibleSyntaxProcessor;
use crate::template::Template;

/// Result of converting one markdown document.
#[derive(Clone, Debug)]
pub struct ConvertResult {
    /// Final HTML with all placeholders substituted.
    pub html: String,
    /// Warnings from tree processors.
    pub warnings: Vec<String>,
}

/// Converts markdown documents into visible-syntax HTML.
///
/// The converter parses markdown, runs the visible-syntax rewrite over the
/// tree (plus any extra processors), serializes, and lets each processor
/// post-process the serialized document; the stashed code-block HTML comes
/// back in that step. Each [`convert`](Self::convert) call uses a fresh
/// rewrite pass with its own placeholder stash, so one converter can handle
/// many documents.
///
/// # Example
///
/// ```
/// use mdlens_render::Converter;
///
/// let mut converter = Converter::new();
/// let result = converter.convert("# Title");
/// assert!(result.html.contains("md-hash"));
/// ```
pub struct Converter {
    highlighter: Option<Box<dyn Highlighter>>,
    processors: Vec<Box<dyn TreeProcessor>>,
}

impl Converter {
    /// Create a converter with no highlighter and no extra processors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlighter: None,
            processors: Vec::new(),
        }
    }

    /// Attach the highlighter used for code blocks.
    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    /// Install an extra tree processor, run after the visible-syntax pass.
    ///
    /// Processors run in installation order and live as long as the
    /// converter, so one processor can accumulate state across documents.
    #[must_use]
    pub fn with_processor<P: TreeProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Convert markdown to a visible-syntax HTML fragment.
    pub fn convert(&mut self, markdown: &str) -> ConvertResult {
        let mut root = parse_document(markdown);

        let mut visible = VisibleSyntaxProcessor::new();
        if let Some(highlighter) = self.highlighter.as_deref() {
            visible = visible.with_highlighter(highlighter);
        }
        visible.run(&mut root);
        for processor in &mut self.processors {
            processor.run(&mut root);
        }

        let blocks = visible.extracted_blocks();
        let mut html = to_html(&root);
        visible.post_process(&mut html);
        for processor in &mut self.processors {
            processor.post_process(&mut html);
        }

        tracing::debug!(blocks, bytes = html.len(), "converted document");

        ConvertResult {
            html,
            warnings: self
                .processors
                .iter()
                .flat_map(|p| p.warnings().iter().cloned())
                .collect(),
        }
    }

    /// Convert markdown and inject the fragment into `template`.
    pub fn convert_with_template(&mut self, markdown: &str, template: &Template) -> ConvertResult {
        let mut result = self.convert(markdown);
        result.html = template.render(&result.html);
        result
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use mdlens_tree::{escape_html, Node, NodeKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::PlainHighlighter;

    /// Wraps every line in a deterministic keyword span.
    struct LineSpanHighlighter;

    impl Highlighter for LineSpanHighlighter {
        fn highlight(&self, source: &str, _language: Option<&str>) -> String {
            let lines: Vec<String> = source
                .split('\n')
                .map(|line| {
                    if line.is_empty() {
                        String::new()
                    } else {
                        format!("<span class=\"syn-keyword\">{}</span>", escape_html(line))
                    }
                })
                .collect();
            lines.join("\n")
        }
    }

    struct CountingProcessor {
        paragraphs: usize,
        warnings: Vec<String>,
    }

    impl CountingProcessor {
        fn new() -> Self {
            Self {
                paragraphs: 0,
                warnings: Vec::new(),
            }
        }

        fn count(&mut self, node: &Node) {
            if node.kind == NodeKind::Paragraph {
                self.paragraphs += 1;
            }
            for child in &node.children {
                self.count(child);
            }
        }
    }

    impl TreeProcessor for CountingProcessor {
        fn run(&mut self, root: &mut Node) {
            self.count(root);
            if self.paragraphs == 0 {
                self.warnings.push("document has no paragraphs".to_owned());
            }
        }

        fn warnings(&self) -> &[String] {
            &self.warnings
        }
    }

    #[test]
    fn test_end_to_end_without_highlighter() {
        let markdown = "# Title\n\nSome *em* and **bold** and `code`.";
        let result = Converter::new().convert(markdown);
        let html = &result.html;

        assert!(html.contains(r#"<span class="md-hash">#</span> Title"#));
        assert!(html.contains(r#"<span class="md-asterisk">*</span>"#));
        assert!(html.contains(r#"<span class="md-italic">em</span>"#));
        assert!(html.contains(r#"<span class="md-double-asterisk">**</span>"#));
        assert!(html.contains(r#"<span class="md-bold">bold</span>"#));
        assert!(html.contains(r#"<span class="md-backtick">`</span>"#));
        assert!(html.contains(r#"<span class="md-code">code</span>"#));
        assert!(!html.contains('\u{e000}'));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_end_to_end_code_block_substitution() {
        let markdown = "before\n\n```python\ndef f():\n    return 1\n```\n\nafter";
        let result = Converter::new()
            .with_highlighter(LineSpanHighlighter)
            .convert(markdown);
        let html = &result.html;

        assert!(html.contains(r#"<div class="md-codeblock">"#));
        assert!(html.contains(r#"<div class="md-codeblock-line">"#));
        // The second line carries exactly one indent guide.
        assert_eq!(html.matches("md-codeblock-indent").count(), 1);
        // Substituted markup is live HTML, not escaped text.
        assert!(html.contains(r#"<span class="syn-keyword">def f():</span>"#));
        assert!(!html.contains('\u{e000}'));
        assert!(html.contains("<p>before</p>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_markup_in_code_is_escaped_before_substitution() {
        let markdown = "```\n<b>&amp;</b>\n```";
        let result = Converter::new().with_highlighter(PlainHighlighter).convert(markdown);
        assert!(result.html.contains("&lt;b&gt;&amp;amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_converter_is_reusable_across_documents() {
        let mut converter = Converter::new().with_highlighter(PlainHighlighter);
        let first = converter.convert("```\none\n```");
        let second = converter.convert("```\ntwo\n```");
        assert!(first.html.contains("one"));
        assert!(second.html.contains("two"));
        assert!(!second.html.contains("one"));
        assert!(!second.html.contains('\u{e000}'));
    }

    #[test]
    fn test_extra_processor_sees_rewritten_tree_and_warns() {
        // By the time extra processors run, headings are divs, not paragraphs.
        let result = Converter::new()
            .with_processor(CountingProcessor::new())
            .convert("# Only a heading");
        assert_eq!(result.warnings, vec!["document has no paragraphs".to_owned()]);
    }

    #[test]
    fn test_convert_with_template() {
        let template = Template::new("<html><body>{{CONTENT}}</body></html>").unwrap();
        let result = Converter::new().convert_with_template("hello", &template);
        assert_eq!(result.html, "<html><body><p>hello</p></body></html>");
    }
}
