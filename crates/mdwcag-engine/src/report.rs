//! Report - Outcome of checking one document

use mdwcag_a11y::{Diagnostic, Diagnostics, Severity};
use mdwcag_dom::DomTree;
use serde::Serialize;

/// A checked document
#[derive(Debug, Serialize)]
pub struct Report {
    /// Where the Markdown came from (file path or `-`)
    pub source: String,
    /// Tree after every pass has run
    #[serde(skip)]
    pub tree: DomTree,
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Findings at or above `min`
    pub fn findings(&self, min: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.at_least(min)
    }

    /// Whether any accessibility finding was recorded
    pub fn has_findings(&self) -> bool {
        self.findings(Severity::Info).next().is_some()
    }
}
