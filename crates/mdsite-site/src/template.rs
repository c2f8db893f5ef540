//! HTML page template for static site generation.
//!
//! A template is a plain HTML file with two placeholders, `{{ Title }}` and
//! `{{ Content }}`, substituted verbatim for every page.

use std::path::Path;

use crate::builder::BuildError;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Page template loaded once per build.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Create a template from its source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TemplateNotFound`] if the file does not exist,
    /// [`BuildError::Io`] if it cannot be read.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        if !path.is_file() {
            return Err(BuildError::TemplateNotFound(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        if !source.contains(CONTENT_PLACEHOLDER) {
            tracing::warn!(
                path = %path.display(),
                placeholder = CONTENT_PLACEHOLDER,
                "Template is missing placeholder"
            );
        }
        Ok(Self::new(source))
    }

    /// Render a complete page, replacing every placeholder occurrence.
    ///
    /// The title is substituted first, so a title containing the literal
    /// content placeholder is replaced by the content as well.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}
