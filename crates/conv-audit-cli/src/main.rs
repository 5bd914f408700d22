//! conv-audit CLI tool.
//!
//! Usage:
//! ```bash
//! conv-audit check <CHECK> [PATH] [--remote URL] [--forbid LIB]...
//! conv-audit all [PATH] [--remote URL]
//! conv-audit list-checks
//! conv-audit init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use conv_audit_core::{AuditError, CheckKind, Source};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Heuristic convention and architecture auditor for repositories
#[derive(Parser)]
#[command(name = "conv-audit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single check
    Check {
        /// Check to run (see `list-checks`)
        check: CheckKind,

        #[command(flatten)]
        target: Target,
    },

    /// Run every check against one checkout
    All {
        #[command(flatten)]
        target: Target,
    },

    /// List available checks
    ListChecks,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// What to scan and how to print it.
#[derive(Args)]
struct Target {
    /// Local directory to analyze (default: current directory unless --remote is given)
    path: Option<PathBuf>,

    /// Git URL to shallow-clone and analyze instead of a local directory
    #[arg(short, long)]
    remote: Option<String>,

    /// Forbidden library name for the dependency check (can be specified multiple times)
    #[arg(long = "forbid")]
    forbid: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,
}

impl Target {
    fn source(&self) -> Source {
        let local_path = self
            .path
            .clone()
            .or_else(|| self.remote.is_none().then(|| PathBuf::from(".")));
        Source {
            local_path,
            remote_url: self.remote.clone(),
        }
    }

    /// Local directory whose project config applies; `None` for a remote-only scan.
    fn scan_dir(&self) -> Option<PathBuf> {
        self.source().local_path
    }

    fn forbidden_libs(&self) -> Option<&[String]> {
        (!self.forbid.is_empty()).then_some(self.forbid.as_slice())
    }
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Check { check, target } => {
            let config = config_resolver::resolve(cli.config.as_deref(), target.scan_dir().as_deref());
            commands::check::run(
                check,
                &target.source(),
                target.forbidden_libs(),
                target.format,
                &config,
            )
        }
        Commands::All { target } => {
            let config = config_resolver::resolve(cli.config.as_deref(), target.scan_dir().as_deref());
            commands::check::run_all(
                &target.source(),
                target.forbidden_libs(),
                target.format,
                &config,
            )
        }
        Commands::ListChecks => {
            commands::list_checks::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast::<AuditError>() {
            Ok(audit_err) => {
                eprintln!("{:?}", miette::Report::new(audit_err));
                std::process::exit(2);
            }
            Err(other) => Err(other),
        },
    }
}
