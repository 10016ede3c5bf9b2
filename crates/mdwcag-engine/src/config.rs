//! Checker configuration

use std::path::{Path, PathBuf};

use mdwcag_a11y::PassKind;
use mdwcag_a11y::passes::contrast::DEFAULT_MAX_ALLOC;
use mdwcag_markdown::ParserOptions;
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Passes to run, in order
    #[serde(default = "default_passes")]
    pub passes: Vec<PassKind>,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub contrast: ContrastConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            markdown: MarkdownConfig::default(),
            contrast: ContrastConfig::default(),
        }
    }
}

/// Everything except `image-contrast`, which touches the filesystem
fn default_passes() -> Vec<PassKind> {
    vec![
        PassKind::AltCheck,
        PassKind::TitleCheck,
        PassKind::AriaRole,
        PassKind::AriaTableRole,
        PassKind::AriaTableIndex,
    ]
}

impl Config {
    /// Replace the pass list
    pub fn with_passes(mut self, passes: Vec<PassKind>) -> Self {
        self.passes = passes;
        self
    }
}

/// Markdown parser switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub deletion: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        let options = ParserOptions::default();
        Self {
            tables: options.tables,
            deletion: options.deletion,
        }
    }
}

impl From<MarkdownConfig> for ParserOptions {
    fn from(config: MarkdownConfig) -> Self {
        ParserOptions {
            tables: config.tables,
            deletion: config.deletion,
        }
    }
}

/// Image lookup for the contrast pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Directory image `src` values resolve against. Unset means the
    /// checked file's directory (or the working directory for stdin).
    pub base_dir: Option<PathBuf>,

    /// Read this file for every image instead of its `src`
    pub fixture: Option<PathBuf>,

    /// Decoder allocation limit in bytes
    pub max_alloc: u64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            fixture: None,
            max_alloc: DEFAULT_MAX_ALLOC,
        }
    }
}

/// Load configuration from a TOML file. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
