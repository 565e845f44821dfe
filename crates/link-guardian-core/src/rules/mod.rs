//! Heuristic rules shown in the detailed analysis
//!
//! Rules are illustrative: in live mode they mirror the backend's
//! `heuristics` array, in demo mode a fixed set is shown.

mod loader;

pub use loader::RuleLoader;

use crate::types::{text_field, AnalysisResult, AnalysisRule, DisplayMode, RuleStatus};
use serde_json::Value;

/// Turn a rule name into a stable identifier ("URL length" -> "url-length")
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Convert backend `heuristics` entries (`{rule, matched, details}`)
///
/// A missing or non-boolean `matched` flag means the check itself failed.
/// Entries without a rule name are skipped.
pub fn rules_from_heuristics(raw: &[Value]) -> Vec<AnalysisRule> {
    raw.iter()
        .filter_map(|entry| {
            let name = entry.get("rule").and_then(Value::as_str)?;
            let status = match entry.get("matched").and_then(Value::as_bool) {
                Some(true) => RuleStatus::Matched,
                Some(false) => RuleStatus::NotMatched,
                None => RuleStatus::Failed,
            };
            Some(AnalysisRule {
                id: slugify(name),
                name: name.to_string(),
                status,
                reasoning: text_field(entry, "details"),
            })
        })
        .collect()
}

/// Rules to display for a result in the given mode
pub fn select_rules(
    result: &AnalysisResult,
    mode: DisplayMode,
    demo: &[AnalysisRule],
) -> Vec<AnalysisRule> {
    match mode {
        DisplayMode::Demo => demo.to_vec(),
        DisplayMode::Live => result
            .raw_heuristics()
            .map(|raw| rules_from_heuristics(raw.as_slice()))
            .unwrap_or_default(),
    }
}

fn rule(id: &str, name: &str, status: RuleStatus, reasoning: &str) -> AnalysisRule {
    AnalysisRule {
        id: id.to_string(),
        name: name.to_string(),
        status,
        reasoning: reasoning.to_string(),
    }
}

/// Built-in rules shown in demo mode
pub fn demo_rules() -> Vec<AnalysisRule> {
    vec![
        rule(
            "https",
            "HTTPS Protocol",
            RuleStatus::Matched,
            "URL uses secure HTTPS protocol, indicating encrypted connection.",
        ),
        rule(
            "domain-age",
            "Domain Age",
            RuleStatus::Matched,
            "Domain registered 5+ years ago. Established domain with longer history.",
        ),
        rule(
            "url-length",
            "URL Length",
            RuleStatus::Matched,
            "URL length is reasonable (45 characters). Suspicious URLs often exceed 75 characters.",
        ),
        rule(
            "suspicious-keywords",
            "Suspicious Keywords",
            RuleStatus::Matched,
            "No phishing indicators or suspicious keywords detected in URL.",
        ),
        rule(
            "ip-address",
            "Direct IP Address",
            RuleStatus::Matched,
            "Domain name used instead of raw IP address, indicating legitimate hosting.",
        ),
        rule(
            "url-encoding",
            "URL Encoding Anomalies",
            RuleStatus::NotMatched,
            "Unusual encoding patterns detected but within acceptable range.",
        ),
        rule(
            "reputation-score",
            "Domain Reputation Score",
            RuleStatus::Matched,
            "Positive reputation score from multiple sources. Trust score: 92/100.",
        ),
        rule(
            "recent-registration",
            "Recent Registration Detection",
            RuleStatus::Matched,
            "Domain was not recently registered. Registered on: 2019-03-15.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("URL length"), "url-length");
        assert_eq!(slugify("  Subdomain  count! "), "subdomain-count");
        assert_eq!(slugify("HTTPS"), "https");
    }

    #[test]
    fn test_heuristics_mapping() {
        let raw = vec![
            json!({"rule": "HTTPS", "matched": true, "details": "URL uses HTTPS"}),
            json!({"rule": "URL length", "matched": false, "details": "URL very long"}),
            json!({"rule": "Suspicious keyword", "matched": "yes"}),
            json!({"matched": true}),
        ];

        let rules = rules_from_heuristics(&raw);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].status, RuleStatus::Matched);
        assert_eq!(rules[1].status, RuleStatus::NotMatched);
        assert_eq!(rules[1].reasoning, "URL very long");
        assert_eq!(rules[2].status, RuleStatus::Failed);
        assert_eq!(rules[2].id, "suspicious-keyword");
    }

    #[test]
    fn test_live_without_heuristics_is_empty() {
        let result = AnalysisResult::url_only("https://example.com");
        assert!(select_rules(&result, DisplayMode::Live, &demo_rules()).is_empty());
        assert_eq!(select_rules(&result, DisplayMode::Demo, &demo_rules()).len(), 8);
    }

    #[test]
    fn test_rule_tones() {
        use crate::types::Tone;
        assert_eq!(RuleStatus::Matched.tone(), Tone::Green);
        assert_eq!(RuleStatus::Failed.tone(), Tone::Red);
        assert_eq!(RuleStatus::NotMatched.tone(), Tone::Yellow);
    }
}
