//! Link Guardian CLI
//!
//! Command-line front end for checking URLs against a Link Guardian
//! analysis service.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use link_guardian_core::{DisplayMode, GuardConfig, VerdictLevel};

#[derive(Parser)]
#[command(name = "link-guard")]
#[command(author = "CyberLink Guardian")]
#[command(version)]
#[command(about = "Check suspicious links against a URL analysis service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Analysis service origin (e.g., http://localhost:8000)
    #[arg(short, long, global = true, env = "LINK_GUARD_BACKEND")]
    backend: Option<String>,

    /// Show labelled demo data instead of calling a backend
    #[arg(long, global = true)]
    demo: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (only show results)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Suspect,
    Malicious,
}

impl From<LevelArg> for VerdictLevel {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Suspect => VerdictLevel::Suspect,
            LevelArg::Malicious => VerdictLevel::Malicious,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single URL
    Scan {
        /// URL to analyze
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with non-zero code if the verdict is at or above this level
        #[arg(long, value_enum)]
        fail_on: Option<LevelArg>,
    },

    /// Prompt for URLs until end of input
    Interactive,

    /// Show how verdicts map to scores and recommendations
    Verdicts,

    /// List the supported security sources
    Sources,

    /// Show version and configuration
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Merge the config file with command-line overrides
fn load_config(cli: &Cli) -> Result<GuardConfig> {
    let mut config =
        GuardConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(ref backend) = cli.backend {
        config.backend_origin = Some(backend.clone());
    }
    if cli.demo {
        config.mode = DisplayMode::Demo;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep output clean by default
    let filter = if cli.verbose {
        "link_guard=debug,link_guardian_core=debug"
    } else if cli.quiet {
        "link_guard=error,link_guardian_core=error"
    } else {
        "link_guard=warn,link_guardian_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .without_time()
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Scan {
            url,
            format,
            output,
            fail_on,
        } => commands::scan::run(&config, &url, format, output, fail_on.map(Into::into), cli.quiet).await,
        Commands::Interactive => commands::interactive::run(&config).await,
        Commands::Verdicts => {
            commands::verdicts::run();
            Ok(())
        }
        Commands::Sources => {
            commands::sources::run();
            Ok(())
        }
        Commands::Version => {
            commands::version::run(&config);
            Ok(())
        }
    }
}
