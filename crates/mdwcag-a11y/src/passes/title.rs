//! Page title - WCAG 2.4.2 Page Titled (Level A)
//!
//! Root-only check. The parser leaves a lone newline as the root text when
//! nothing title-like precedes the first block.

use mdwcag_dom::{DomTree, NodeId, NodePath};

use super::{Pass, PassKind};
use crate::diagnostics::{Diagnostic, Diagnostics, WcagCriterion};

/// Root text signalling an untitled document
const NO_TITLE_MARKER: &str = "\n";

/// `title-check`
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleCheck;

impl Pass for TitleCheck {
    fn kind(&self) -> PassKind {
        PassKind::TitleCheck
    }

    fn run(&mut self, tree: &mut DomTree, _scope: NodeId, sink: &mut Diagnostics) {
        let root = tree.element(tree.root());
        if root.and_then(|r| r.text()) == Some(NO_TITLE_MARKER) {
            sink.push(
                Diagnostic::info("title-missing", "No title found")
                    .with_criterion(WcagCriterion::PageTitled)
                    .at(NodePath::root()),
            );
        }
    }
}
