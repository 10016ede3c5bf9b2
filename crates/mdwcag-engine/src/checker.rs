//! Checker - Markdown in, annotated tree and diagnostics out

use std::path::{Path, PathBuf};

use mdwcag_a11y::{Diagnostics, ImageFileProbe, Pipeline, PipelineError};
use mdwcag_dom::{DomTree, NodeId};
use mdwcag_markdown::{BlockHook, MarkdownParser, ParseError};

use crate::config::{Config, ConfigError};
use crate::report::Report;

/// Engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs block-stage passes as the parser completes each table
struct BlockStage<'a> {
    pipeline: &'a mut Pipeline,
    sink: &'a mut Diagnostics,
}

impl BlockHook for BlockStage<'_> {
    fn table_built(&mut self, tree: &mut DomTree, parent: NodeId) {
        self.pipeline.run_block_stage(tree, parent, self.sink);
    }
}

/// Parser plus pass pipeline
#[derive(Debug, Clone)]
pub struct Checker {
    config: Config,
    parser: MarkdownParser,
}

impl Checker {
    /// Validate `config` and build a checker
    pub fn new(config: Config) -> Result<Self, EngineError> {
        // surfaces duplicate passes before any document is read
        Pipeline::from_kinds(&config.passes, Box::new(ImageFileProbe::default()))?;

        let parser = MarkdownParser::with_options(config.markdown.into());
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check Markdown text; image paths resolve against `base_dir` or the
    /// working directory
    pub fn check(&self, source: &str, markdown: &str) -> Result<Report, EngineError> {
        let base_dir = self
            .config
            .contrast
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        self.run(source, markdown, base_dir)
    }

    /// Check a Markdown file; image paths resolve against `base_dir` or the
    /// file's directory
    pub fn check_file(&self, path: &Path) -> Result<Report, EngineError> {
        let markdown = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = match &self.config.contrast.base_dir {
            Some(dir) => dir.clone(),
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        self.run(&path.display().to_string(), &markdown, base_dir)
    }

    fn probe(&self, base_dir: PathBuf) -> ImageFileProbe {
        let contrast = &self.config.contrast;
        let probe = ImageFileProbe::new(base_dir).with_max_alloc(contrast.max_alloc);
        match &contrast.fixture {
            Some(fixture) => probe.with_fixture(fixture),
            None => probe,
        }
    }

    fn run(&self, source: &str, markdown: &str, base_dir: PathBuf) -> Result<Report, EngineError> {
        tracing::info!("Checking {}", source);

        let probe = self.probe(base_dir);
        let mut pipeline = Pipeline::from_kinds(&self.config.passes, Box::new(probe))?;
        let mut diagnostics = Diagnostics::new();

        let mut tree = if pipeline.has_block_passes() {
            let mut hook = BlockStage {
                pipeline: &mut pipeline,
                sink: &mut diagnostics,
            };
            self.parser.parse_with(markdown, &mut hook)?
        } else {
            self.parser.parse(markdown)?
        };

        pipeline.run(&mut tree, &mut diagnostics);

        Ok(Report {
            source: source.to_string(),
            tree,
            diagnostics,
        })
    }
}
