//! mdwcag Engine
//!
//! Accessibility checker for Markdown documents.
//!
//! # Example
//! ```rust,no_run
//! use mdwcag_engine::{Checker, Config};
//!
//! let checker = Checker::new(Config::default())?;
//! let report = checker.check_file("README.md".as_ref())?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok::<(), mdwcag_engine::EngineError>(())
//! ```

mod checker;
mod config;
mod report;

pub use checker::{Checker, EngineError};
pub use config::{Config, ConfigError, ContrastConfig, MarkdownConfig, load_config};
pub use report::Report;

// Re-export sub-crates for advanced usage
pub use mdwcag_a11y as a11y;
pub use mdwcag_dom as dom;
pub use mdwcag_markdown as markdown;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
