//! Scan command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use link_guardian_core::{GuardConfig, Guardian, ResultsView, VerdictLevel};
use std::path::PathBuf;

use super::banner;
use crate::output;
use crate::OutputFormat;

/// Run the scan command
pub async fn run(
    config: &GuardConfig,
    url: &str,
    format: OutputFormat,
    output_path: Option<PathBuf>,
    fail_on: Option<VerdictLevel>,
    quiet: bool,
) -> Result<()> {
    let guardian = Guardian::new(config).context("Failed to set up analysis backend")?;

    let spinner = (!quiet && matches!(format, OutputFormat::Text))
        .then(|| banner::spinner("Analyzing..."));

    let outcome = guardian.check(url).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let view = outcome
        .with_context(|| format!("Could not analyze '{}'", url.trim()))?
        .context("No result available")?;

    let output_str = output::format_view(&view, format)?;

    if let Some(output_file) = output_path {
        std::fs::write(&output_file, &output_str)
            .context(format!("Failed to write to {}", output_file.display()))?;
        tracing::info!("Results written to: {}", output_file.display());
        if !quiet {
            print_summary(&view);
        }
    } else {
        println!("{}", output_str);
    }

    if let Some(threshold) = fail_on {
        if view.meets(threshold) {
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_summary(view: &ResultsView) {
    println!(
        "{} {} {}",
        view.url.bold(),
        "->".dimmed(),
        output::paint(view.verdict.recommendation, view.verdict.recommendation_tone).bold()
    );
}
