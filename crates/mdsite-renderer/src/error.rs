//! Errors raised while compiling a document.

/// Error returned by the inline parser, the block compiler or title extraction.
///
/// Every variant aborts compilation of the current document; no partial tree
/// is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Unterminated emphasis/code delimiter, or an image/link pattern that
    /// could not be split out of its surrounding text.
    #[error("Invalid markdown: {0}")]
    MalformedInlineSyntax(String),
    /// Heading marker with no text after it.
    #[error("Invalid heading: {0:?}")]
    InvalidHeading(String),
    /// Code block without a fence at both ends.
    #[error("Invalid code block: missing ``` fence")]
    InvalidCodeBlock,
    /// Line inside a quote block that does not start with `>`.
    #[error("Invalid quote block line: {0:?}")]
    InvalidQuoteBlock(String),
    /// Document has no `# ` heading line.
    #[error("No title found: document has no level 1 heading")]
    MissingTitle,
    /// Block kind name with no registered compiler.
    #[error("Unknown block kind: {0}")]
    UnknownBlockKind(String),
}
