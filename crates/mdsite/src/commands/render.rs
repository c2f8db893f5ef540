//! `mdsite render` command implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mdsite_renderer::{compile, render_document};
use mdsite_site::Template;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input Markdown file.
    input: PathBuf,

    /// Output HTML file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the fragment in a page template (requires a `# ` title).
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = fs::read_to_string(&self.input)?;
        let html = render_markdown(&markdown, self.template.as_deref())?;

        match &self.output {
            Some(path) => {
                fs::write(path, html)?;
                Output::new().success(&format!("Created {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Render a document as a bare fragment, or as a full page when a template is given.
fn render_markdown(markdown: &str, template: Option<&Path>) -> Result<String, CliError> {
    match template {
        Some(path) => {
            let template = Template::load(path)?;
            let document = render_document(markdown)?;
            Ok(template.render(&document.title, &document.html))
        }
        None => Ok(compile(markdown)?.render()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_fragment() {
        let html = render_markdown("# Title\n\nSome **bold** text.", None).unwrap();
        assert_eq!(html, "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>");
    }

    #[test]
    fn test_render_fragment_without_title() {
        let html = render_markdown("just text", None).unwrap();
        assert_eq!(html, "<div><p>just text</p></div>");
    }

    #[test]
    fn test_render_with_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("t.html");
        fs::write(&path, "<h1>{{ Title }}</h1>{{ Content }}").unwrap();

        let html = render_markdown("# Hi\n\n* x", Some(&path)).unwrap();
        assert_eq!(html, "<h1>Hi</h1><div><h1>Hi</h1><ul><li>x</li></ul></div>");
    }

    #[test]
    fn test_render_with_template_requires_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("t.html");
        fs::write(&path, "{{ Content }}").unwrap();

        let err = render_markdown("no title", Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
    }
}
