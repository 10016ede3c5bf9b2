//! mdwcag CLI - WCAG checks for Markdown documents

mod output;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mdwcag_engine::a11y::{PassKind, Severity};
use mdwcag_engine::{Checker, Report, load_config};
use tracing_subscriber::EnvFilter;

/// Accessibility checks for Markdown documents
#[derive(Parser)]
#[command(name = "mdwcag")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Markdown files (stdin when none are given)
    Check {
        /// Markdown files to check
        files: Vec<PathBuf>,

        /// Configuration file
        #[arg(long, short, default_value = "mdwcag.toml")]
        config: PathBuf,

        /// Run only these passes, in order (repeatable)
        #[arg(long = "pass", value_name = "NAME")]
        passes: Vec<PassKind>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Print the annotated element tree after each report
        #[arg(long)]
        tree: bool,

        /// Enable verbose logging and show debug diagnostics
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the available passes
    Passes,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            files,
            config,
            passes,
            format,
            tree,
            verbose,
        } => {
            init_logging(verbose);

            let mut config = load_config(&config)?;
            if !passes.is_empty() {
                config = config.with_passes(passes);
            }
            let checker = Checker::new(config)?;
            let reports = check_all(&checker, &files)?;

            match format {
                FormatArg::Text => {
                    let min = if verbose { Severity::Debug } else { Severity::Info };
                    print!("{}", output::render_text(&reports, min, tree));
                }
                FormatArg::Json => println!("{}", output::render_json(&reports)?),
            }

            if reports.iter().any(Report::has_findings) {
                std::process::exit(1);
            }
        }

        Commands::Passes => {
            for kind in PassKind::ALL {
                println!("{:<18} {:?} stage", kind.name(), kind.stage());
            }
        }
    }

    Ok(())
}

fn check_all(checker: &Checker, files: &[PathBuf]) -> anyhow::Result<Vec<Report>> {
    if files.is_empty() {
        let mut markdown = String::new();
        std::io::stdin()
            .read_to_string(&mut markdown)
            .context("failed to read stdin")?;
        return Ok(vec![checker.check("-", &markdown)?]);
    }

    files
        .iter()
        .map(|file| {
            checker
                .check_file(file)
                .with_context(|| format!("checking {}", file.display()))
        })
        .collect()
}
