//! Block-to-tree compilation.

use crate::block::{BlockKind, FENCE, ordered_marker};
use crate::error::RenderError;
use crate::html::HtmlNode;
use crate::inline::parse_to_html;

/// Compile one classified block into its HTML tree.
///
/// # Errors
///
/// Returns [`RenderError`] when the block content does not match its kind
/// or contains malformed inline syntax.
pub fn compile_block(block: &str, kind: BlockKind) -> Result<HtmlNode, RenderError> {
    match kind {
        BlockKind::Paragraph => paragraph(block),
        BlockKind::Heading(level) => heading(block, level),
        BlockKind::Code => code(block),
        BlockKind::Quote => quote(block),
        BlockKind::UnorderedList => unordered_list(block),
        BlockKind::OrderedList => ordered_list(block),
    }
}

fn paragraph(block: &str) -> Result<HtmlNode, RenderError> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", parse_to_html(&text)?))
}

fn heading(block: &str, level: u8) -> Result<HtmlNode, RenderError> {
    let marker_len = usize::from(level) + 1;
    let Some(text) = block.get(marker_len..).filter(|t| !t.is_empty()) else {
        return Err(RenderError::InvalidHeading(block.to_owned()));
    };
    Ok(HtmlNode::parent(format!("h{level}"), parse_to_html(text)?))
}

/// Code fences are stripped but the content is still inline-parsed, so
/// `*` and `` ` `` inside a fence act as emphasis markers.
fn code(block: &str) -> Result<HtmlNode, RenderError> {
    let inner = block
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .ok_or(RenderError::InvalidCodeBlock)?;
    // Drop the character right after the opening fence (normally the newline).
    let mut chars = inner.chars();
    chars.next();
    let code = HtmlNode::parent("code", parse_to_html(chars.as_str())?);
    Ok(HtmlNode::parent("pre", vec![code]))
}

fn quote(block: &str) -> Result<HtmlNode, RenderError> {
    let mut cleaned = Vec::new();
    for line in block.lines() {
        if !line.starts_with('>') {
            return Err(RenderError::InvalidQuoteBlock(line.to_owned()));
        }
        cleaned.push(line.trim_start_matches('>').trim());
    }
    let text = cleaned.join(" ");
    Ok(HtmlNode::parent("blockquote", parse_to_html(&text)?))
}

fn unordered_list(block: &str) -> Result<HtmlNode, RenderError> {
    let items = block
        .lines()
        .map(|line| list_item(line.get(2..).unwrap_or_default()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ul", items))
}

fn ordered_list(block: &str) -> Result<HtmlNode, RenderError> {
    let items = block
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let marker = ordered_marker(i + 1);
            list_item(line.strip_prefix(marker.as_str()).unwrap_or(line))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ol", items))
}

fn list_item(text: &str) -> Result<HtmlNode, RenderError> {
    Ok(HtmlNode::parent("li", parse_to_html(text)?))
}
