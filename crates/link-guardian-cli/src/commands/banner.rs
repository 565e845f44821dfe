//! CLI banner and shared terminal helpers

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the main banner
pub fn print_banner() {
    println!();
    println!("{}", "╔═╗╦ ╦╔╗ ╔═╗╦═╗╦  ╦╔╗╔╦╔═".cyan());
    println!("{}", "║  ╚╦╝╠╩╗║╣ ╠╦╝║  ║║║║╠╩╗".cyan());
    println!("{}", "╚═╝ ╩ ╚═╝╚═╝╩╚═╩═╝╩╝╚╝╩ ╩".cyan());
    println!();
    println!("  {} v{}", "CyberLink Guardian".white().bold(), VERSION);
    println!();
}

/// Print a compact header for subcommands
pub fn print_header(title: &str) {
    println!();
    println!("{} {}", "Link Guardian".cyan().bold(), format!("| {}", title).dimmed());
    println!("{}", "=".repeat(60).dimmed());
}

/// Print a section divider
pub fn print_divider() {
    println!("{}", "-".repeat(60).dimmed());
}

/// Spinner shown while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Error banner
pub fn print_error(message: &str) {
    println!("{} {}", "Error:".red().bold(), message.red());
}
