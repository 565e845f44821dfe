//! Results view assembled from one analysis result

use crate::rules::select_rules;
use crate::sources::{provider_id, select_sources};
use crate::types::{AnalysisResult, AnalysisRule, DisplayMode, ExternalError, SourceResult};
use crate::verdict::{map_verdict_value, VerdictDisplay, VerdictLevel};
use serde::Serialize;

/// Everything the front end renders for a result
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub url: String,
    pub mode: DisplayMode,
    /// Global decision badge ("Safe", "Suspect", "Malicious")
    pub decision: Option<&'static str>,
    pub verdict: VerdictDisplay,
    pub sources: Vec<SourceResult>,
    pub rules: Vec<AnalysisRule>,
    pub reasons: Vec<String>,
    pub external_errors: Vec<ExternalError>,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl ResultsView {
    /// Build the view for a result
    pub fn build(result: &AnalysisResult, mode: DisplayMode, demo_rules: &[AnalysisRule]) -> Self {
        let verdict = map_verdict_value(result.decision_level_value());

        Self {
            url: result.url.clone(),
            mode,
            decision: verdict.level.badge(),
            verdict,
            sources: select_sources(result, mode),
            rules: select_rules(result, mode, demo_rules),
            reasons: result.reasons(),
            external_errors: result
                .external_errors()
                .into_iter()
                .filter(|e| provider_id(&e.source).is_some())
                .collect(),
            received_at: result.received_at,
        }
    }

    pub fn level(&self) -> VerdictLevel {
        self.verdict.level
    }

    /// Whether the view shows mock data
    pub fn is_demo(&self) -> bool {
        self.mode == DisplayMode::Demo
    }

    /// Whether the verdict is at or above the given level
    ///
    /// `Unknown` never meets a threshold.
    pub fn meets(&self, threshold: VerdictLevel) -> bool {
        fn rank(level: VerdictLevel) -> u8 {
            match level {
                VerdictLevel::Unknown => 0,
                VerdictLevel::Safe => 1,
                VerdictLevel::Suspect => 2,
                VerdictLevel::Malicious => 3,
            }
        }
        self.level() != VerdictLevel::Unknown && rank(self.level()) >= rank(threshold)
    }
}
