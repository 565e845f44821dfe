//! Client configuration
//!
//! Loaded from TOML. The backend origin has no built-in default: it comes
//! from the command line, the environment or the config file.

use crate::client::{AnalysisBackend, DemoBackend, HttpBackend};
use crate::error::{GuardError, Result};
use crate::rules::{demo_rules, RuleLoader};
use crate::submission::SubmissionFlow;
use crate::types::{AnalysisRule, DisplayMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the backend origin
pub const BACKEND_ENV: &str = "LINK_GUARD_BACKEND";

/// Configuration for the client
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Origin of the analysis service (e.g., "http://localhost:8000")
    #[serde(default)]
    pub backend_origin: Option<String>,
    /// Live backend data or labelled demo data
    #[serde(default)]
    pub mode: DisplayMode,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// How long status announcements stay visible
    #[serde(default = "default_announcement_seconds")]
    pub announcement_seconds: u64,
    /// Artificial delay of the demo backend in milliseconds
    #[serde(default = "default_demo_delay")]
    pub demo_delay_ms: u64,
    /// TOML file replacing the built-in demo rules
    #[serde(default)]
    pub demo_rules_path: Option<PathBuf>,
}

fn default_timeout() -> u64 {
    30
}

fn default_announcement_seconds() -> u64 {
    3
}

fn default_demo_delay() -> u64 {
    2000
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            backend_origin: None,
            mode: DisplayMode::default(),
            timeout_seconds: default_timeout(),
            announcement_seconds: default_announcement_seconds(),
            demo_delay_ms: default_demo_delay(),
            demo_rules_path: None,
        }
    }
}

impl GuardConfig {
    /// Per-user config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("link-guard").join("config.toml"))
    }

    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: GuardConfig = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load an explicit file, or the per-user file when present, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Build the backend selected by the mode
    pub fn backend(&self) -> Result<Arc<dyn AnalysisBackend>> {
        match self.mode {
            DisplayMode::Demo => Ok(Arc::new(DemoBackend::new(Duration::from_millis(
                self.demo_delay_ms,
            )))),
            DisplayMode::Live => {
                let origin = self.backend_origin.as_deref().ok_or_else(|| {
                    GuardError::Config(format!(
                        "No backend origin configured; pass --backend or set {}",
                        BACKEND_ENV
                    ))
                })?;
                Ok(Arc::new(HttpBackend::new(origin, self.timeout())?))
            }
        }
    }

    /// Rules shown in demo mode
    pub fn demo_rules(&self) -> Result<Vec<AnalysisRule>> {
        match &self.demo_rules_path {
            Some(path) => RuleLoader::new().load_from_file(path),
            None => Ok(demo_rules()),
        }
    }

    /// Fresh submission flow using the configured announcement lifetime
    pub fn flow(&self) -> SubmissionFlow {
        SubmissionFlow::new(Duration::from_secs(self.announcement_seconds))
    }
}
