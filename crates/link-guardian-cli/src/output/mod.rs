//! Output formatting for analysis results

use anyhow::Result;
use colored::{ColoredString, Colorize};
use link_guardian_core::{AnalysisRule, ResultsView, RuleStatus, SourceResult, Tone};

use crate::OutputFormat;

/// Apply a tone to a piece of text
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Green => text.green(),
        Tone::Yellow => text.yellow(),
        Tone::Red => text.red(),
        Tone::Gray => text.dimmed(),
        Tone::Plain => text.normal(),
    }
}

/// Format a results view according to the specified format
pub fn format_view(view: &ResultsView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
    }
}

fn format_text(view: &ResultsView) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{} {}\n", "Results for:".bold(), view.url));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if view.is_demo() {
        output.push_str(&format!(
            "{}\n",
            "DEMO DATA: sources and rules below are samples, not live results".yellow().bold()
        ));
    }

    if let Some(decision) = view.decision {
        output.push_str(&format!(
            "Global decision: {}\n",
            paint(decision, view.verdict.level.tone()).bold()
        ));
    }

    output.push_str(&format!("\n{}\n", "Security Source Results".bold()));
    output.push_str(&format!("{}\n", "-".repeat(60)));
    if view.sources.is_empty() {
        output.push_str(&format!("{}\n", "No source results reported.".dimmed()));
    }
    for source in &view.sources {
        output.push_str(&format_source(source));
    }

    output.push_str(&format!("\n{}\n", "Detailed Analysis".bold()));
    output.push_str(&format!("{}\n", "-".repeat(60)));
    if view.rules.is_empty() {
        output.push_str(&format!("{}\n", "No heuristics reported.".dimmed()));
    }
    for rule in &view.rules {
        output.push_str(&format_rule(rule));
    }

    if !view.reasons.is_empty() {
        output.push_str(&format!("\n{}\n", "Reasons:".bold()));
        for reason in &view.reasons {
            output.push_str(&format!("  {} {}\n", "-".dimmed(), reason));
        }
    }

    output.push_str(&format_summary(view));
    output
}

fn format_source(source: &SourceResult) -> String {
    let badge = format!("[{}]", source.status.label());
    format!(
        "{:<6} {:<24} {} {}\n",
        source.icon.bold(),
        source.name,
        paint(&badge, source.status.tone()).bold(),
        source.details.dimmed()
    )
}

fn format_rule(rule: &AnalysisRule) -> String {
    let mark = match rule.status {
        RuleStatus::Matched => "✓",
        RuleStatus::Failed => "✗",
        RuleStatus::NotMatched => "•",
    };
    format!(
        "{} {}\n    {}\n",
        paint(mark, rule.status.tone()).bold(),
        rule.name.bold(),
        rule.reasoning
    )
}

/// Safety score, risk level and recommendation
fn format_summary(view: &ResultsView) -> String {
    let verdict = &view.verdict;
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", "=".repeat(60)));
    output.push_str(&format!(
        "Safety Score:    {}\n",
        paint(&format!("{}/100", verdict.score), verdict.score_tone).bold()
    ));
    output.push_str(&format!(
        "Risk Level:      {}\n",
        paint(verdict.risk_label, verdict.risk_tone).bold()
    ));
    output.push_str(&format!(
        "Recommendation:  {}\n",
        paint(verdict.recommendation, verdict.recommendation_tone).bold()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));
    output
}
