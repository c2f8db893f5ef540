//! Markdown subset to HTML tree compiler.
//!
//! A document goes through three stages:
//! - [`split_blocks`] / [`classify_block`]: blank-line-delimited blocks tagged with a [`BlockKind`]
//! - [`compile_block`]: one [`HtmlNode`] per block, inline text parsed by [`parse_inline`]
//! - [`compile`]: all blocks collected under a root `div`
//!
//! Supported syntax: `#` headings, paragraphs, fenced code, `>` quotes,
//! `*`/`-` and `1.` lists, and inline `**bold**`, `*italic*`, `` `code` ``,
//! `[links](url)` and `![images](url)`. Inline styles do not nest.
//!
//! # Example
//!
//! ```
//! use mdsite_renderer::{compile, extract_title};
//!
//! let markdown = "# Hello\n\n**Bold** text";
//! let html = compile(markdown).unwrap().render();
//! assert_eq!(html, "<div><h1>Hello</h1><p><b>Bold</b> text</p></div>");
//! assert_eq!(extract_title(markdown).unwrap(), "Hello");
//! ```

mod block;
mod compiler;
mod document;
mod error;
mod html;
mod inline;

pub use block::{BlockKind, classify_block, split_blocks};
pub use compiler::compile_block;
pub use document::{RenderedDocument, compile, extract_title, render_document};
pub use error::RenderError;
pub use html::{Attributes, HtmlNode};
pub use inline::{InlineKind, InlineNode, parse_inline};
