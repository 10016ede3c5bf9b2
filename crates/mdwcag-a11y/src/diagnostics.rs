//! Diagnostics
//!
//! Structured findings collected by the passes. Every recorded diagnostic is
//! also mirrored to `tracing` at its severity.

use std::fmt;

use mdwcag_dom::NodePath;
use serde::{Serialize, Serializer};

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Trace of a change a pass made
    Debug,
    /// Accessibility finding
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// WCAG 2.1 success criteria referenced by the passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WcagCriterion {
    /// 1.1.1 (Level A)
    NonTextContent,
    /// 1.4.3 (Level AA)
    ContrastMinimum,
    /// 2.4.2 (Level A)
    PageTitled,
}

impl WcagCriterion {
    pub fn number(self) -> &'static str {
        match self {
            Self::NonTextContent => "1.1.1",
            Self::ContrastMinimum => "1.4.3",
            Self::PageTitled => "2.4.2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NonTextContent => "Non-text Content",
            Self::ContrastMinimum => "Contrast (Minimum)",
            Self::PageTitled => "Page Titled",
        }
    }
}

/// `WCAG 2.1 - 1.1.1 Non-text Content`
impl fmt::Display for WcagCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WCAG 2.1 - {} {}", self.number(), self.name())
    }
}

impl Serialize for WcagCriterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A finding from one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Check identifier (e.g. "alt-missing")
    pub rule_id: &'static str,
    /// WCAG criterion, when the finding maps to one
    pub criterion: Option<WcagCriterion>,
    pub severity: Severity,
    pub message: String,
    /// Where in the tree the finding applies
    pub node_path: NodePath,
}

impl Diagnostic {
    pub fn new(rule_id: &'static str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            criterion: None,
            severity,
            message: message.into(),
            node_path: NodePath::root(),
        }
    }

    pub fn info(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Info, message)
    }

    pub fn debug(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Debug, message)
    }

    pub fn with_criterion(mut self, criterion: WcagCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }

    pub fn at(mut self, path: NodePath) -> Self {
        self.node_path = path;
        self
    }
}

/// `[WCAG 2.1 - 1.1.1 Non-text Content] Found an image ...`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.criterion {
            Some(criterion) => write!(f, "[{}] {}", criterion, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Diagnostic sink handed to every pass
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!(
                rule = diagnostic.rule_id,
                path = %diagnostic.node_path,
                "{diagnostic}"
            ),
            Severity::Debug => tracing::debug!(
                rule = diagnostic.rule_id,
                path = %diagnostic.node_path,
                "{diagnostic}"
            ),
        }
        self.records.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    /// Diagnostics at or above `min`
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.severity >= min)
    }

    /// Diagnostics raised by one check
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.records.iter().filter(move |d| d.rule_id == rule_id)
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.records
    }
}

impl Serialize for Diagnostics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
