//! Sources command - list the supported security sources

use colored::Colorize;
use link_guardian_core::sources::PROVIDERS;

use super::banner;

/// Run the sources command
pub fn run() {
    banner::print_header("Security Sources");

    for provider in PROVIDERS.iter() {
        println!(
            "  {:<5} {:<24} {}",
            provider.icon.cyan().bold(),
            provider.name,
            provider.id.dimmed()
        );
    }

    println!();
    println!(
        "{}",
        "Results from other providers are not displayed.".dimmed()
    );
}
