//! Inline span parsing.
//!
//! Text is parsed by a fixed pipeline of rewrite passes: bold (`**`),
//! italic (`*`), code (`` ` ``), images and links. Every pass only rewrites
//! nodes that are still [`InlineKind::Plain`], so the order matters: `**` has
//! to be consumed before a lone `*` is treated as italic, and images before
//! links because `[alt](url)` is a substring of `![alt](url)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RenderError;
use crate::html::{Attributes, HtmlNode};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Kind of an inline span. Links and images carry their target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

/// Typed span of inline text.
///
/// For images `text` holds the alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineNode {
    pub text: String,
    pub kind: InlineKind,
}

impl InlineNode {
    pub fn new(text: impl Into<String>, kind: InlineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, InlineKind::Plain)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, InlineKind::Link { url: url.into() })
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, InlineKind::Image { url: url.into() })
    }

    /// Target URL, present only for links and images.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            InlineKind::Link { url } | InlineKind::Image { url } => Some(url),
            _ => None,
        }
    }

    fn is_plain(&self) -> bool {
        self.kind == InlineKind::Plain
    }

    /// Convert the span into the HTML leaf that renders it.
    pub fn to_html_node(&self) -> HtmlNode {
        match &self.kind {
            InlineKind::Plain => HtmlNode::text(self.text.as_str()),
            InlineKind::Bold => HtmlNode::leaf("b", self.text.as_str()),
            InlineKind::Italic => HtmlNode::leaf("i", self.text.as_str()),
            InlineKind::Code => HtmlNode::leaf("code", self.text.as_str()),
            InlineKind::Link { url } => HtmlNode::leaf("a", self.text.as_str())
                .with_attrs(Attributes::new().with("href", url.as_str())),
            InlineKind::Image { url } => HtmlNode::leaf("img", "").with_attrs(
                Attributes::new()
                    .with("src", url.as_str())
                    .with("alt", self.text.as_str()),
            ),
        }
    }
}

/// Parse `text` into an ordered sequence of inline spans.
///
/// # Errors
///
/// Returns [`RenderError::MalformedInlineSyntax`] for an unterminated
/// delimiter or an image/link that cannot be split out of its text.
///
/// # Examples
///
/// ```
/// use mdsite_renderer::{InlineKind, InlineNode, parse_inline};
///
/// let nodes = parse_inline("**bold** and *italic*").unwrap();
/// assert_eq!(
///     nodes,
///     vec![
///         InlineNode::new("bold", InlineKind::Bold),
///         InlineNode::plain(" and "),
///         InlineNode::new("italic", InlineKind::Italic),
///     ]
/// );
/// ```
pub fn parse_inline(text: &str) -> Result<Vec<InlineNode>, RenderError> {
    let nodes = vec![InlineNode::plain(text)];
    let nodes = split_delimiter(nodes, "**", &InlineKind::Bold)?;
    let nodes = split_delimiter(nodes, "*", &InlineKind::Italic)?;
    let nodes = split_delimiter(nodes, "`", &InlineKind::Code)?;
    let nodes = split_images(nodes)?;
    split_links(nodes)
}

/// Parse `text` and convert every span to its HTML leaf.
pub(crate) fn parse_to_html(text: &str) -> Result<Vec<HtmlNode>, RenderError> {
    Ok(parse_inline(text)?
        .iter()
        .map(InlineNode::to_html_node)
        .collect())
}

/// Split every plain node on `delimiter`, tagging odd segments with `kind`.
fn split_delimiter(
    nodes: Vec<InlineNode>,
    delimiter: &str,
    kind: &InlineKind,
) -> Result<Vec<InlineNode>, RenderError> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let sections: Vec<&str> = node.text.split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(RenderError::MalformedInlineSyntax(format!(
                "unclosed `{delimiter}` in {:?}",
                node.text
            )));
        }

        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            let section_kind = if i % 2 == 0 {
                InlineKind::Plain
            } else {
                kind.clone()
            };
            out.push(InlineNode::new(section, section_kind));
        }
    }
    Ok(out)
}

/// A `[text](url)` style match found in a plain node.
struct PatternMatch<'a> {
    literal: &'a str,
    text: &'a str,
    url: &'a str,
}

fn split_images(nodes: Vec<InlineNode>) -> Result<Vec<InlineNode>, RenderError> {
    split_pattern(nodes, "image", find_images, |alt, url| InlineNode::image(alt, url))
}

fn split_links(nodes: Vec<InlineNode>) -> Result<Vec<InlineNode>, RenderError> {
    split_pattern(nodes, "link", find_links, |text, url| InlineNode::link(text, url))
}

fn find_images(text: &str) -> Vec<PatternMatch<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| PatternMatch {
            literal: caps.get(0).map_or("", |m| m.as_str()),
            text: caps.get(1).map_or("", |m| m.as_str()),
            url: caps.get(2).map_or("", |m| m.as_str()),
        })
        .collect()
}

/// Link matches, excluding any immediately preceded by `!`.
fn find_links(text: &str) -> Vec<PatternMatch<'_>> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if text[..whole.start()].ends_with('!') {
                return None;
            }
            Some(PatternMatch {
                literal: whole.as_str(),
                text: caps.get(1).map_or("", |m| m.as_str()),
                url: caps.get(2).map_or("", |m| m.as_str()),
            })
        })
        .collect()
}

/// Split plain nodes around every match of a pattern.
///
/// All matches in a node are collected first, then the remaining text is
/// split once per match on the literal matched substring.
fn split_pattern(
    nodes: Vec<InlineNode>,
    label: &str,
    find: fn(&str) -> Vec<PatternMatch<'_>>,
    build: fn(&str, &str) -> InlineNode,
) -> Result<Vec<InlineNode>, RenderError> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let matches = find(&node.text);
        if matches.is_empty() {
            out.push(node);
            continue;
        }

        let mut remaining = node.text.as_str();
        for found in matches {
            let Some((before, after)) = remaining.split_once(found.literal) else {
                return Err(RenderError::MalformedInlineSyntax(format!(
                    "{label} section not closed in {:?}",
                    node.text
                )));
            };
            if !before.is_empty() {
                out.push(InlineNode::plain(before));
            }
            out.push(build(found.text, found.url));
            remaining = after;
        }
        if !remaining.is_empty() {
            out.push(InlineNode::plain(remaining));
        }
    }
    Ok(out)
}
