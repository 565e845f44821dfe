//! Verdicts command - print the verdict mapping table

use colored::Colorize;
use link_guardian_core::{VerdictDisplay, VerdictLevel};

use super::banner;
use crate::output::paint;

/// Run the verdicts command
pub fn run() {
    banner::print_header("Verdicts");

    println!(
        "{:<12} {:>6}  {:<12} {}",
        "LEVEL".bold(),
        "SCORE".bold(),
        "RISK".bold(),
        "RECOMMENDATION".bold()
    );
    banner::print_divider();

    for level in VerdictLevel::all() {
        let display = VerdictDisplay::for_level(level);
        println!(
            "{:<12} {:>6}  {:<12} {}",
            paint(&level.to_string(), level.tone()),
            display.score,
            display.risk_label,
            paint(display.recommendation, display.recommendation_tone)
        );
    }

    println!();
    println!(
        "{}",
        "Any other level sent by the backend is shown as unknown.".dimmed()
    );
}
