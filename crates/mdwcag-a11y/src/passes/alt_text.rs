//! Image alt text - WCAG 1.1.1 Non-text Content (Level A)
//!
//! - Every `img` must carry non-empty alt text. Missing or empty values are
//!   reported and replaced by a placeholder, so every visited image has
//!   alt text after the pass.
//! - Images sitting side by side in one paragraph should not repeat the
//!   same alt text.

use std::collections::HashSet;

use mdwcag_dom::{DomTree, NodeId, Tag};

use super::{Pass, PassKind};
use crate::diagnostics::{Diagnostic, Diagnostics, WcagCriterion};
use crate::visitor::{ElementVisitor, VisitContext, walk_from};

/// Placeholder written into images without usable alt text
pub const NO_ALT_TEXT: &str = "No alt text provided";

/// Reports and repairs missing or empty `alt`
pub struct AltMissingFinder<'a> {
    sink: &'a mut Diagnostics,
}

impl<'a> AltMissingFinder<'a> {
    pub fn new(sink: &'a mut Diagnostics) -> Self {
        Self { sink }
    }
}

impl ElementVisitor for AltMissingFinder<'_> {
    fn visit_img(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        let Some(img) = tree.element_mut(node) else {
            return;
        };
        let src = img.get("src").unwrap_or_default().to_string();

        let (rule_id, message) = match img.get("alt") {
            None => (
                "alt-missing",
                format!("Found an image with no alt text for {src}"),
            ),
            Some("") => (
                "alt-empty",
                format!("Found an image with empty alt text for {src}"),
            ),
            Some(_) => return,
        };

        img.set("alt", NO_ALT_TEXT);
        self.sink.push(
            Diagnostic::info(rule_id, message)
                .with_criterion(WcagCriterion::NonTextContent)
                .at(cx.path().clone()),
        );
    }
}

/// Reports repeated alt text among a paragraph's direct images
pub struct AltDuplicateFinder<'a> {
    sink: &'a mut Diagnostics,
}

impl<'a> AltDuplicateFinder<'a> {
    pub fn new(sink: &'a mut Diagnostics) -> Self {
        Self { sink }
    }
}

impl ElementVisitor for AltDuplicateFinder<'_> {
    fn visit_p(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        let mut seen: HashSet<String> = HashSet::new();

        for (index, child) in tree.children(node).enumerate() {
            let Some(img) = tree.element(child).filter(|e| e.tag == Tag::Img) else {
                continue;
            };
            let Some(alt) = img.get("alt") else {
                continue;
            };
            if seen.contains(alt) {
                let src = img.get("src").unwrap_or_default();
                self.sink.push(
                    Diagnostic::info(
                        "alt-duplicate",
                        format!("Found an image with duplicate alt text({alt}) for {src}"),
                    )
                    .with_criterion(WcagCriterion::NonTextContent)
                    .at(cx.path().child(index)),
                );
            } else {
                seen.insert(alt.to_string());
            }
        }
    }
}

/// `alt-check`: missing/empty repair, then duplicate detection
#[derive(Debug, Default, Clone, Copy)]
pub struct AltCheck;

impl Pass for AltCheck {
    fn kind(&self) -> PassKind {
        PassKind::AltCheck
    }

    fn run(&mut self, tree: &mut DomTree, scope: NodeId, sink: &mut Diagnostics) {
        walk_from(&mut AltMissingFinder::new(sink), tree, scope);
        walk_from(&mut AltDuplicateFinder::new(sink), tree, scope);
    }
}
