//! Whole-document compilation.

use crate::block::{classify_block, split_blocks};
use crate::compiler::compile_block;
use crate::error::RenderError;
use crate::html::HtmlNode;

/// Result of rendering a document for a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Text of the first level 1 heading.
    pub title: String,
    /// Rendered content markup.
    pub html: String,
}

/// Compile a document into a single `div` tree, one child per block.
///
/// # Errors
///
/// The first failing block aborts compilation; no partial tree is returned.
///
/// # Examples
///
/// ```
/// let root = mdsite_renderer::compile("# Title\n\nSome **bold** text.").unwrap();
/// assert_eq!(
///     root.render(),
///     "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>"
/// );
/// ```
pub fn compile(document: &str) -> Result<HtmlNode, RenderError> {
    let children = split_blocks(document)
        .into_iter()
        .map(|block| {
            let kind = classify_block(block);
            tracing::trace!(%kind, len = block.len(), "Compiling block");
            compile_block(block, kind)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Text following the first line that starts with `# `.
///
/// Only level 1 headings count; `## Sub` lines are skipped.
pub fn extract_title(document: &str) -> Result<String, RenderError> {
    document
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::to_owned)
        .ok_or(RenderError::MissingTitle)
}

/// Compile and render a document, extracting its title.
pub fn render_document(document: &str) -> Result<RenderedDocument, RenderError> {
    let html = compile(document)?.render();
    let title = extract_title(document)?;
    Ok(RenderedDocument { title, html })
}
