//! Markdown parser front end

use mdwcag_dom::{DomTree, NodeId};
use pulldown_cmark::{Options, Parser};

use crate::ParseError;
use crate::builder::TreeBuilder;

/// Callbacks invoked while the tree is still being built
pub trait BlockHook {
    /// A table block under `parent` has just been completed
    fn table_built(&mut self, _tree: &mut DomTree, _parent: NodeId) {}
}

impl BlockHook for () {}

/// Parser switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Recognise pipe tables
    pub tables: bool,
    /// Turn `--text--` into `del` elements
    pub deletion: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tables: true,
            deletion: true,
        }
    }
}

/// Markdown parser
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParserOptions,
}

impl MarkdownParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse Markdown into an element tree
    pub fn parse(&self, markdown: &str) -> Result<DomTree, ParseError> {
        self.parse_with(markdown, &mut ())
    }

    /// Parse Markdown, calling `hook` as blocks complete
    pub fn parse_with(
        &self,
        markdown: &str,
        hook: &mut dyn BlockHook,
    ) -> Result<DomTree, ParseError> {
        tracing::debug!("Parsing Markdown document ({} bytes)", markdown.len());

        let mut cmark = Options::empty();
        if self.options.tables {
            cmark.insert(Options::ENABLE_TABLES);
        }

        let mut builder = TreeBuilder::new(self.options.deletion, hook);
        for event in Parser::new_ext(markdown, cmark) {
            builder.push(event)?;
        }
        let tree = builder.finish()?;

        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }
}
