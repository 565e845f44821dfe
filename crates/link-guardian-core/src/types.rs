//! Core type definitions for the Link Guardian client

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Abstract display color, mapped to concrete colors by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Gray,
    /// No styling at all
    Plain,
}

/// Where the displayed sources and rules come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Only data returned by the backend is shown
    #[default]
    Live,
    /// Fixed mock data, always labelled as such
    Demo,
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Live => write!(f, "live"),
            DisplayMode::Demo => write!(f, "demo"),
        }
    }
}

/// Status reported by a single security source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Clean,
    Suspicious,
    Malicious,
    Error,
    /// Anything the backend sent that is not one of the above
    #[serde(other)]
    Unknown,
}

impl SourceStatus {
    /// Parse a raw status string, degrading to `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "clean" => SourceStatus::Clean,
            "suspicious" => SourceStatus::Suspicious,
            "malicious" => SourceStatus::Malicious,
            "error" => SourceStatus::Error,
            _ => SourceStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceStatus::Clean => "Clean",
            SourceStatus::Suspicious => "Suspicious",
            SourceStatus::Malicious => "Malicious",
            SourceStatus::Error => "Error",
            SourceStatus::Unknown => "Unknown",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SourceStatus::Clean => Tone::Green,
            SourceStatus::Suspicious => Tone::Yellow,
            SourceStatus::Malicious => Tone::Red,
            SourceStatus::Error => Tone::Gray,
            SourceStatus::Unknown => Tone::Plain,
        }
    }
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Findings of one threat-intelligence provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Provider identifier (e.g., "virustotal")
    pub id: String,
    /// Human-readable provider name
    pub name: String,
    /// Short badge text (e.g., "VT")
    pub icon: String,
    /// Provider verdict
    pub status: SourceStatus,
    /// Free-text details from the provider
    pub details: String,
}

/// Outcome of one heuristic rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleStatus {
    Matched,
    NotMatched,
    Failed,
}

impl RuleStatus {
    pub fn tone(&self) -> Tone {
        match self {
            RuleStatus::Matched => Tone::Green,
            RuleStatus::Failed => Tone::Red,
            RuleStatus::NotMatched => Tone::Yellow,
        }
    }
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleStatus::Matched => write!(f, "matched"),
            RuleStatus::NotMatched => write!(f, "not-matched"),
            RuleStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A heuristic check with its reasoning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRule {
    pub id: String,
    pub name: String,
    pub status: RuleStatus,
    pub reasoning: String,
}

/// A provider that did not answer the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalError {
    pub source: String,
    pub details: String,
}

/// Result of analyzing one URL
///
/// The backend body is untrusted, so it is kept as a raw JSON object and
/// every accessor degrades instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The URL that was submitted
    pub url: String,
    /// Raw backend body
    #[serde(flatten)]
    pub body: Map<String, Value>,
    /// When the result was received
    #[serde(skip, default = "chrono::Utc::now")]
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl AnalysisResult {
    /// Build a result from the submitted URL and the decoded response body
    ///
    /// A `url` string in the body overrides the submitted one. Bodies that are
    /// not JSON objects are treated as empty.
    pub fn from_response(submitted_url: &str, body: Value) -> Self {
        let mut body = match body {
            Value::Object(map) => map,
            other => {
                tracing::warn!("Analysis response is not an object: {}", other);
                Map::new()
            }
        };

        let url = match body.remove("url") {
            Some(Value::String(url)) => url,
            _ => submitted_url.to_string(),
        };

        Self {
            url,
            body,
            received_at: chrono::Utc::now(),
        }
    }

    /// Result with no backend data, as produced by the demo backend
    pub fn url_only(url: &str) -> Self {
        Self::from_response(url, Value::Object(Map::new()))
    }

    /// Raw `final_decision.level` value, if any
    pub fn decision_level_value(&self) -> Option<&Value> {
        self.body.get("final_decision")?.get("level")
    }

    /// `final_decision.level` when it is a string
    pub fn decision_level(&self) -> Option<&str> {
        self.decision_level_value().and_then(Value::as_str)
    }

    /// `final_decision.reasons`, skipping non-string entries
    pub fn reasons(&self) -> Vec<String> {
        string_items(
            self.body
                .get("final_decision")
                .and_then(|d| d.get("reasons")),
        )
    }

    /// `sources` when it is an array
    pub fn raw_sources(&self) -> Option<&Vec<Value>> {
        self.body.get("sources").and_then(Value::as_array)
    }

    /// `heuristics` when it is an array
    pub fn raw_heuristics(&self) -> Option<&Vec<Value>> {
        self.body.get("heuristics").and_then(Value::as_array)
    }

    /// `external_checks` when it is an array
    pub fn raw_external_checks(&self) -> Option<&Vec<Value>> {
        self.body.get("external_checks").and_then(Value::as_array)
    }

    /// Providers the backend reported as unreachable
    pub fn external_errors(&self) -> Vec<ExternalError> {
        self.body
            .get("external_errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| {
                        Some(ExternalError {
                            source: e.get("source")?.as_str()?.to_string(),
                            details: text_field(e, "details"),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Read a string field, defaulting to empty
pub(crate) fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
