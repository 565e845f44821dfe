//! Interactive prompt: enter URLs one at a time

use anyhow::{Context, Result};
use colored::Colorize;
use link_guardian_core::error::EMPTY_URL_MESSAGE;
use link_guardian_core::{GuardConfig, Guardian, SubmissionState};
use std::io::{self, BufRead, Write};

use super::banner;
use crate::output;
use crate::OutputFormat;

/// Run the interactive prompt until end of input
pub async fn run(config: &GuardConfig) -> Result<()> {
    let guardian = Guardian::new(config).context("Failed to set up analysis backend")?;

    banner::print_header("Interactive");
    println!(
        "{}",
        "Paste any URL and press Enter. Ctrl-D to quit.".dimmed()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        print!("{} ", "URL to analyze:".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            banner::print_error(EMPTY_URL_MESSAGE);
            continue;
        }

        let spinner = banner::spinner("Analyzing...");
        let outcome = guardian.check(&line).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(Some(view)) => {
                if let Some(message) = guardian
                    .session()
                    .with_flow(|flow| flow.announcement().map(str::to_string))
                {
                    println!("{}", message.dimmed());
                }
                println!("{}", output::format_view(&view, OutputFormat::Text)?);
            }
            Ok(None) => {}
            Err(_) => {
                if let SubmissionState::Error { message } = guardian.session().state() {
                    banner::print_error(&message);
                }
                if guardian.current_view().is_some() {
                    println!("{}", "Previous result is still shown above.".dimmed());
                }
            }
        }
    }

    Ok(())
}
