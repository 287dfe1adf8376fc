//! Output page template with a single content slot.

/// Marker replaced by the rendered fragment.
const CONTENT_MARKER: &str = "{{CONTENT}}";

/// Template validation error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template does not contain the content marker.
    #[error("template is missing the {CONTENT_MARKER} marker")]
    MissingMarker,

    /// The template contains the marker more than once.
    #[error("template contains {0} {CONTENT_MARKER} markers, expected exactly one")]
    DuplicateMarker(usize),
}

/// An HTML page template with exactly one `{{CONTENT}}` slot.
///
/// # Example
///
/// ```
/// use mdlens_render::Template;
///
/// let template = Template::new("<main>{{CONTENT}}</main>").unwrap();
/// assert_eq!(template.render("<p>hi</p>"), "<main><p>hi</p></main>");
/// ```
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    /// Validate and wrap a template string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] unless the template contains the
    /// `{{CONTENT}}` marker exactly once.
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        match source.matches(CONTENT_MARKER).count() {
            0 => Err(TemplateError::MissingMarker),
            1 => Ok(Self { source }),
            n => Err(TemplateError::DuplicateMarker(n)),
        }
    }

    /// Substitute the content marker with `fragment`.
    #[must_use]
    pub fn render(&self, fragment: &str) -> String {
        self.source.replacen(CONTENT_MARKER, fragment, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_marker() {
        let template = Template::new("<body>\n{{CONTENT}}\n</body>").unwrap();
        assert_eq!(template.render("<p>x</p>"), "<body>\n<p>x</p>\n</body>");
    }

    #[test]
    fn test_missing_marker_is_rejected() {
        let err = Template::new("<body></body>").unwrap_err();
        assert!(matches!(err, TemplateError::MissingMarker));
    }

    #[test]
    fn test_duplicate_marker_is_rejected() {
        let err = Template::new("{{CONTENT}}{{CONTENT}}").unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateMarker(2)));
    }

    #[test]
    fn test_fragment_containing_marker_text_is_inert() {
        let template = Template::new("[{{CONTENT}}]").unwrap();
        // replacen stops after the template's own marker.
        assert_eq!(template.render("{{CONTENT}}"), "[{{CONTENT}}]");
    }
}
