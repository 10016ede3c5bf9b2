//! mdwcag Markdown
//!
//! Builds an element tree from Markdown text on top of pulldown-cmark.
//! The output follows the ElementTree shape the accessibility passes expect:
//! a `div` root, element-only children, and character data split between
//! `text` and `tail`.
//!
//! Block hooks let callers act on a freshly built table before the rest of
//! the document is parsed.

mod builder;
mod deletion;
mod parser;

pub use mdwcag_dom::{DomError, DomTree, NodeId};
pub use parser::{BlockHook, MarkdownParser, ParserOptions};

/// Parse Markdown with default options and no hooks
pub fn parse(markdown: &str) -> Result<DomTree, ParseError> {
    MarkdownParser::new().parse(markdown)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("tree construction failed: {0}")]
    Dom(#[from] DomError),
}
