//! HTML tree produced by the block compiler.
//!
//! A document compiles to a single [`HtmlNode`] tree rooted at a `div`.
//! Rendering is a pure recursive concatenation, so rendering the same tree
//! twice always yields identical markup.

use std::fmt::Write;

/// Insertion-ordered HTML attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, keeping insertion order.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Look up an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as ` key="value"` pairs in insertion order.
    fn render_into(&self, out: &mut String) {
        for (key, value) in &self.0 {
            write!(out, r#" {key}="{value}""#).unwrap();
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Renderable HTML node.
///
/// A `Leaf` always carries a value and a `Parent` always carries a tag and a
/// (possibly empty) child list, so rendering cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Text value, optionally wrapped in a tag. Without a tag it renders as raw text.
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Attributes,
    },
    /// Tagged element owning an ordered list of children.
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Attributes,
    },
}

impl HtmlNode {
    /// Raw text leaf with no wrapping markup.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: None,
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    /// Tagged leaf, e.g. `<b>value</b>`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attrs: Attributes::new(),
        }
    }

    /// Tagged element wrapping `children`.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Parent {
            tag: tag.into(),
            children,
            attrs: Attributes::new(),
        }
    }

    /// Replace the node's attributes.
    #[must_use]
    pub fn with_attrs(mut self, new_attrs: Attributes) -> Self {
        match &mut self {
            Self::Leaf { attrs, .. } | Self::Parent { attrs, .. } => *attrs = new_attrs,
        }
        self
    }

    /// Tag name, `None` for raw text leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf { tag, .. } => tag.as_deref(),
            Self::Parent { tag, .. } => Some(tag),
        }
    }

    /// Children of a parent node; leaves have none.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Parent { children, .. } => children,
        }
    }

    /// Render the tree to markup.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256);
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::Leaf {
                tag: None, value, ..
            } => out.push_str(value),
            Self::Leaf {
                tag: Some(tag),
                value,
                attrs,
            } => {
                write!(out, "<{tag}").unwrap();
                attrs.render_into(out);
                write!(out, ">{value}</{tag}>").unwrap();
            }
            Self::Parent {
                tag,
                children,
                attrs,
            } => {
                write!(out, "<{tag}").unwrap();
                attrs.render_into(out);
                out.push('>');
                for child in children {
                    child.render_into(out);
                }
                write!(out, "</{tag}>").unwrap();
            }
        }
    }
}
