//! Verdict mapping
//!
//! Maps the backend's `final_decision.level` onto the safety score, risk
//! label and recommendation shown to the user. The mapping is total: any
//! value other than the three known levels falls to the `Unknown` row.

use crate::types::Tone;
use serde::Serialize;
use serde_json::Value;

/// Overall verdict supplied by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLevel {
    Safe,
    Suspect,
    Malicious,
    Unknown,
}

impl VerdictLevel {
    /// Exact, case-sensitive parse. Absent or unrecognized input is `Unknown`.
    pub fn parse(level: Option<&str>) -> Self {
        match level {
            Some("safe") => VerdictLevel::Safe,
            Some("suspect") => VerdictLevel::Suspect,
            Some("malicious") => VerdictLevel::Malicious,
            _ => VerdictLevel::Unknown,
        }
    }

    /// Parse an arbitrary JSON value (null, numbers and objects are `Unknown`)
    pub fn from_value(level: Option<&Value>) -> Self {
        Self::parse(level.and_then(Value::as_str))
    }

    /// Badge text for the global decision, absent for `Unknown`
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            VerdictLevel::Safe => Some("Safe"),
            VerdictLevel::Suspect => Some("Suspect"),
            VerdictLevel::Malicious => Some("Malicious"),
            VerdictLevel::Unknown => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            VerdictLevel::Safe => Tone::Green,
            VerdictLevel::Suspect => Tone::Yellow,
            VerdictLevel::Malicious => Tone::Red,
            VerdictLevel::Unknown => Tone::Gray,
        }
    }

    /// Every level, in table order
    pub fn all() -> [VerdictLevel; 4] {
        [
            VerdictLevel::Safe,
            VerdictLevel::Suspect,
            VerdictLevel::Malicious,
            VerdictLevel::Unknown,
        ]
    }
}

impl std::fmt::Display for VerdictLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictLevel::Safe => write!(f, "safe"),
            VerdictLevel::Suspect => write!(f, "suspect"),
            VerdictLevel::Malicious => write!(f, "malicious"),
            VerdictLevel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Display attributes derived from a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerdictDisplay {
    pub level: VerdictLevel,
    /// Safety score from 0 to 100
    pub score: u8,
    pub score_tone: Tone,
    pub risk_label: &'static str,
    pub risk_tone: Tone,
    pub recommendation: &'static str,
    pub recommendation_tone: Tone,
}

impl VerdictDisplay {
    /// Display row for a parsed level
    pub fn for_level(level: VerdictLevel) -> Self {
        let (score, risk_label, recommendation) = match level {
            VerdictLevel::Safe => (92, "Very Low", "Safe to Visit"),
            VerdictLevel::Suspect => (55, "Moderate", "Proceed with Caution"),
            VerdictLevel::Malicious => (17, "High", "Do Not Visit"),
            VerdictLevel::Unknown => (0, "Unknown", "No Recommendation"),
        };
        let tone = level.tone();

        Self {
            level,
            score,
            score_tone: tone,
            risk_label,
            risk_tone: tone,
            recommendation,
            recommendation_tone: tone,
        }
    }
}

/// Map a raw decision level to its display attributes
pub fn map_verdict(level: Option<&str>) -> VerdictDisplay {
    VerdictDisplay::for_level(VerdictLevel::parse(level))
}

/// Map an untyped decision level to its display attributes
pub fn map_verdict_value(level: Option<&Value>) -> VerdictDisplay {
    VerdictDisplay::for_level(VerdictLevel::from_value(level))
}
