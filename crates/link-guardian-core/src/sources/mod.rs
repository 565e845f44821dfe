//! Security source selection
//!
//! Decides which per-provider results are displayed. Only providers on the
//! allow-list are ever shown; in demo mode a fixed mock set is used instead
//! of backend data.

mod checks;

pub use checks::{provider_id, sources_from_checks, vt_malicious_count};

use crate::types::{text_field, AnalysisResult, DisplayMode, SourceResult, SourceStatus};
use serde_json::Value;
use tracing::debug;

/// Provider ids that may be displayed, in canonical order
pub const ALLOWED_SOURCE_IDS: [&str; 3] = ["virustotal", "google-safe", "alienvault"];

/// Static description of a supported provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provider {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// The supported providers
pub const PROVIDERS: [Provider; 3] = [
    Provider {
        id: "virustotal",
        name: "VirusTotal",
        icon: "VT",
    },
    Provider {
        id: "google-safe",
        name: "Google Safe Browsing",
        icon: "GSB",
    },
    Provider {
        id: "alienvault",
        name: "AlienVault OTX",
        icon: "OTX",
    },
];

/// Look up a supported provider by id
pub fn provider(id: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.id == id)
}

/// Whether a provider id is on the allow-list
pub fn is_allowed(id: &str) -> bool {
    ALLOWED_SOURCE_IDS.contains(&id)
}

/// Mock sources shown in demo mode
pub fn demo_sources() -> Vec<SourceResult> {
    vec![
        SourceResult {
            id: "virustotal".to_string(),
            name: "VirusTotal".to_string(),
            icon: "VT".to_string(),
            status: SourceStatus::Clean,
            details: "Malicious: 0, Suspicious: 0, Undetected: 87".to_string(),
        },
        SourceResult {
            id: "google-safe".to_string(),
            name: "Google Safe Browsing".to_string(),
            icon: "GSB".to_string(),
            status: SourceStatus::Clean,
            details: "No threats detected".to_string(),
        },
        SourceResult {
            id: "alienvault".to_string(),
            name: "AlienVault OTX".to_string(),
            icon: "OTX".to_string(),
            status: SourceStatus::Suspicious,
            details: "Suspicious: 1, Recent activity detected".to_string(),
        },
    ]
}

/// Keep only allow-listed entries of an untrusted `sources` array
///
/// Relative order and duplicates are preserved. Entries without a string
/// `id`, or with an id outside the allow-list, are dropped silently.
pub fn filter_sources(raw: &[Value]) -> Vec<SourceResult> {
    raw.iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(Value::as_str)?;
            if !is_allowed(id) {
                debug!("Dropping unsupported source: {}", id);
                return None;
            }
            Some(SourceResult {
                id: id.to_string(),
                name: text_field(entry, "name"),
                icon: text_field(entry, "icon"),
                status: entry
                    .get("status")
                    .and_then(Value::as_str)
                    .map(SourceStatus::parse)
                    .unwrap_or(SourceStatus::Unknown),
                details: text_field(entry, "details"),
            })
        })
        .collect()
}

/// Sources to display for a result in the given mode
///
/// Live mode never falls back to mock data: without `sources` or
/// `external_checks` in the body the list is empty.
pub fn select_sources(result: &AnalysisResult, mode: DisplayMode) -> Vec<SourceResult> {
    match mode {
        DisplayMode::Demo => demo_sources(),
        DisplayMode::Live => {
            if let Some(raw) = result.raw_sources() {
                return filter_sources(raw);
            }

            let checks = result.raw_external_checks();
            let errors = result.external_errors();
            if checks.is_none() && errors.is_empty() {
                return Vec::new();
            }
            sources_from_checks(checks.map(Vec::as_slice).unwrap_or(&[]), &errors)
        }
    }
}
