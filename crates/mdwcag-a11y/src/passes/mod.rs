//! Accessibility passes
//!
//! Each pass applies one rule over the tree. Most are visitors; the title
//! check only looks at the root.

pub mod alt_text;
pub mod aria_role;
pub mod aria_table;
pub mod contrast;
pub mod title;

use std::fmt;
use std::str::FromStr;

use mdwcag_dom::{DomTree, NodeId};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::pipeline::PipelineError;

pub use alt_text::{AltCheck, AltDuplicateFinder, AltMissingFinder, NO_ALT_TEXT};
pub use aria_role::{AriaRole, RoleSetter};
pub use aria_table::{AriaTableIndex, AriaTableRole, TableRoleSetter, TableRowIndexer};
pub use contrast::{ContrastError, ContrastProbe, ImageContrast, ImageContrastChecker, ImageFileProbe};
pub use title::TitleCheck;

/// When a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// While the parser builds the tree, on the parent of each finished block
    Block,
    /// Over the finished tree, in pipeline order
    Tree,
}

/// One rule applied over a tree
pub trait Pass {
    fn kind(&self) -> PassKind;

    fn stage(&self) -> Stage {
        self.kind().stage()
    }

    /// Apply the rule to the subtree rooted at `scope`
    fn run(&mut self, tree: &mut DomTree, scope: NodeId, sink: &mut Diagnostics);
}

/// Recognised pass names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassKind {
    AltCheck,
    TitleCheck,
    AriaRole,
    AriaTableRole,
    AriaTableIndex,
    ImageContrast,
}

impl PassKind {
    pub const ALL: [PassKind; 6] = [
        Self::AltCheck,
        Self::TitleCheck,
        Self::AriaRole,
        Self::AriaTableRole,
        Self::AriaTableIndex,
        Self::ImageContrast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AltCheck => "alt-check",
            Self::TitleCheck => "title-check",
            Self::AriaRole => "aria-role",
            Self::AriaTableRole => "aria-table-role",
            Self::AriaTableIndex => "aria-table-index",
            Self::ImageContrast => "image-contrast",
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            Self::AriaTableRole => Stage::Block,
            _ => Stage::Tree,
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PassKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PipelineError::UnknownPass(s.to_string()))
    }
}
