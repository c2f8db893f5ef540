//! Block segmentation and classification.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Opening/closing marker of a fenced code block.
pub(crate) const FENCE: &str = "```";

/// Kind of a blank-line-delimited block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// ATX heading with its level (1-6).
    Heading(u8),
    Paragraph,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    /// Stable name of the kind, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading(level) => write!(f, "heading{level}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for BlockKind {
    type Err = RenderError;

    /// Parse a kind name. `heading` alone means level 1, `heading3` level 3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(level) = s.strip_prefix("heading") {
            return match level {
                "" => Ok(Self::Heading(1)),
                _ => level
                    .parse::<u8>()
                    .ok()
                    .filter(|l| (1..=6).contains(l))
                    .map(Self::Heading)
                    .ok_or_else(|| RenderError::UnknownBlockKind(s.to_owned())),
            };
        }
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "code" => Ok(Self::Code),
            "quote" => Ok(Self::Quote),
            "unordered_list" => Ok(Self::UnorderedList),
            "ordered_list" => Ok(Self::OrderedList),
            _ => Err(RenderError::UnknownBlockKind(s.to_owned())),
        }
    }
}

/// Split a document into trimmed, non-empty blocks separated by blank lines.
///
/// # Examples
///
/// ```
/// use mdsite_renderer::split_blocks;
///
/// assert_eq!(split_blocks("para1\n\n\n\npara2"), vec!["para1", "para2"]);
/// ```
pub fn split_blocks(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block. Never fails: anything unrecognised is a paragraph.
pub fn classify_block(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }

    let lines: Vec<&str> = block.lines().collect();

    if lines.len() > 1
        && lines.first().is_some_and(|l| l.starts_with(FENCE))
        && lines.last().is_some_and(|l| l.starts_with(FENCE))
    {
        return BlockKind::Code;
    }

    if block.starts_with('>') {
        return if lines.iter().all(|l| l.starts_with('>')) {
            BlockKind::Quote
        } else {
            BlockKind::Paragraph
        };
    }

    for marker in ["* ", "- "] {
        if block.starts_with(marker) {
            return if lines.iter().all(|l| l.starts_with(marker)) {
                BlockKind::UnorderedList
            } else {
                BlockKind::Paragraph
            };
        }
    }

    if block.starts_with("1. ") {
        return if lines
            .iter()
            .enumerate()
            .all(|(i, l)| l.starts_with(&ordered_marker(i + 1)))
        {
            BlockKind::OrderedList
        } else {
            BlockKind::Paragraph
        };
    }

    BlockKind::Paragraph
}

/// Marker of the `n`-th (1-based) ordered list item, e.g. `"3. "`.
pub(crate) fn ordered_marker(n: usize) -> String {
    format!("{n}. ")
}

/// Level of a `#`-style heading: 1-6 hashes followed by a space.
fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block[hashes..].starts_with(' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_blocks() {
        let md = "
This is **bolded** paragraph

This is another paragraph with *italic* text and `code` here
This is the same paragraph on a new line

* This is a list
* with items
";
        assert_eq!(
            split_blocks(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with *italic* text and `code` here\nThis is the same paragraph on a new line",
                "* This is a list\n* with items",
            ]
        );
    }

    #[test]
    fn test_split_blocks_extra_newlines() {
        let md = "
This is **bolded** paragraph




This is another paragraph

* This is a list
* with items
";
        assert_eq!(
            split_blocks(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph",
                "* This is a list\n* with items",
            ]
        );
    }

    #[test]
    fn test_split_blocks_newline_runs_collapse() {
        let expected = vec!["para1", "para2"];
        assert_eq!(split_blocks("para1\n\npara2"), expected);
        assert_eq!(split_blocks("para1\n\n\npara2"), expected);
        assert_eq!(split_blocks("para1\n\n\n\n\n\npara2"), expected);
    }

    #[test]
    fn test_split_blocks_empty_document() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n  \n\n").is_empty());
    }

    #[test]
    fn test_classify_headings() {
        assert_eq!(classify_block("# heading"), BlockKind::Heading(1));
        assert_eq!(classify_block("### heading"), BlockKind::Heading(3));
        assert_eq!(classify_block("###### heading"), BlockKind::Heading(6));
        assert_eq!(classify_block("####### heading"), BlockKind::Paragraph);
        assert_eq!(classify_block("#heading"), BlockKind::Paragraph);
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify_block("```\ncode\n```"), BlockKind::Code);
        assert_eq!(classify_block("```"), BlockKind::Paragraph);
        assert_eq!(classify_block("```\ncode"), BlockKind::Paragraph);
    }

    #[test]
    fn test_classify_quote() {
        assert_eq!(classify_block("> quote\n> more quote"), BlockKind::Quote);
        assert_eq!(classify_block("> quote\nnot quote"), BlockKind::Paragraph);
    }

    #[test]
    fn test_classify_unordered_list() {
        assert_eq!(classify_block("* list\n* items"), BlockKind::UnorderedList);
        assert_eq!(classify_block("- list\n- items"), BlockKind::UnorderedList);
        assert_eq!(classify_block("* list\n- items"), BlockKind::Paragraph);
    }

    #[test]
    fn test_classify_ordered_list() {
        assert_eq!(classify_block("1. list\n2. items"), BlockKind::OrderedList);
        assert_eq!(classify_block("1. list\n3. items"), BlockKind::Paragraph);
        assert_eq!(classify_block("2. list"), BlockKind::Paragraph);
    }

    #[test]
    fn test_classify_paragraph() {
        assert_eq!(classify_block("paragraph"), BlockKind::Paragraph);
    }

    #[test]
    fn test_block_kind_names_round_trip() {
        for kind in [
            BlockKind::Heading(2),
            BlockKind::Paragraph,
            BlockKind::Code,
            BlockKind::Quote,
            BlockKind::UnorderedList,
            BlockKind::OrderedList,
        ] {
            assert_eq!(kind.to_string().parse::<BlockKind>().unwrap(), kind);
        }
        assert_eq!("heading".parse::<BlockKind>().unwrap(), BlockKind::Heading(1));
    }

    #[test]
    fn test_block_kind_unknown_name() {
        assert_eq!(
            "table".parse::<BlockKind>().unwrap_err(),
            RenderError::UnknownBlockKind("table".to_owned())
        );
        assert!(matches!(
            "heading7".parse::<BlockKind>(),
            Err(RenderError::UnknownBlockKind(_))
        ));
    }
}
