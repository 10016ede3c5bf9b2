//! mdwcag Accessibility
//!
//! WCAG checks and ARIA annotation over element trees.
//!
//! # Features
//! - Tag-dispatched visitors ([`visitor::ElementVisitor`])
//! - Alt text repair and duplicate detection (1.1.1)
//! - Page title check (2.4.2)
//! - Heading landmark roles and table roles/row indices
//! - Image contrast estimate (1.4.3)
//! - Structured diagnostics mirrored to `tracing`

pub mod aria;
pub mod diagnostics;
pub mod passes;
pub mod pipeline;
pub mod visitor;

pub use aria::{LandmarkRole, TableRole};
pub use diagnostics::{Diagnostic, Diagnostics, Severity, WcagCriterion};
pub use passes::{ContrastError, ContrastProbe, ImageFileProbe, Pass, PassKind, Stage};
pub use pipeline::{Pipeline, PipelineError};
pub use visitor::{ElementVisitor, VisitContext, walk, walk_from};
