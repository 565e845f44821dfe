//! Source rows derived from the backend's `external_checks` shape
//!
//! Backends that predate the `sources` array report one
//! `{source, malicious, details}` entry per provider plus a list of providers
//! that failed to answer. These are folded into allow-listed rows here.

use super::provider;
use crate::types::{text_field, ExternalError, SourceResult, SourceStatus};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

lazy_static! {
    /// "Malicious: N" counter in VirusTotal details
    static ref VT_MALICIOUS: Regex = Regex::new(r"malicious:\s*(\d+)").unwrap();
}

/// Map a backend provider name to an allow-listed id
pub fn provider_id(source_name: &str) -> Option<&'static str> {
    match source_name {
        "VirusTotal" => Some("virustotal"),
        "GoogleSafeBrowsing" | "Google Safe Browsing" => Some("google-safe"),
        "AlienVault OTX" => Some("alienvault"),
        _ => None,
    }
}

/// Number of engines VirusTotal details report as malicious
pub fn vt_malicious_count(details: &str) -> u32 {
    VT_MALICIOUS
        .captures(&details.to_lowercase())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn row(id: &str, status: SourceStatus, details: String) -> Option<SourceResult> {
    let provider = provider(id)?;
    Some(SourceResult {
        id: provider.id.to_string(),
        name: provider.name.to_string(),
        icon: provider.icon.to_string(),
        status,
        details,
    })
}

/// Build source rows from `external_checks` and `external_errors`
///
/// A single malicious VirusTotal engine is a minority opinion and shows as
/// suspicious. Errors follow the checks, in backend order.
pub fn sources_from_checks(checks: &[Value], errors: &[ExternalError]) -> Vec<SourceResult> {
    let mut rows = Vec::new();

    for check in checks {
        let Some(name) = check.get("source").and_then(Value::as_str) else {
            continue;
        };
        let Some(id) = provider_id(name) else {
            debug!("Dropping unsupported check: {}", name);
            continue;
        };

        let details = text_field(check, "details");
        let malicious = check
            .get("malicious")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let status = if malicious {
            SourceStatus::Malicious
        } else if id == "virustotal" && vt_malicious_count(&details) == 1 {
            SourceStatus::Suspicious
        } else {
            SourceStatus::Clean
        };

        rows.extend(row(id, status, details));
    }

    for error in errors {
        match provider_id(&error.source) {
            Some(id) => rows.extend(row(id, SourceStatus::Error, error.details.clone())),
            None => debug!("Dropping unsupported error source: {}", error.source),
        }
    }

    rows
}
