//! Demo rule file loader

use crate::error::{GuardError, Result};
use crate::types::AnalysisRule;
use std::path::Path;
use tracing::debug;

/// Loader for demo rule definition files
pub struct RuleLoader;

impl RuleLoader {
    /// Create a new rule loader
    pub fn new() -> Self {
        Self
    }

    /// Load demo rules from a TOML file
    pub fn load_from_file(&self, path: &Path) -> Result<Vec<AnalysisRule>> {
        if !path.exists() {
            return Err(GuardError::Config(format!(
                "Rules file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let rules = self.parse_toml(&content, path)?;
        debug!("Loaded {} demo rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Parse TOML content into rules
    fn parse_toml(&self, content: &str, path: &Path) -> Result<Vec<AnalysisRule>> {
        #[derive(serde::Deserialize)]
        struct RulesFile {
            #[serde(default)]
            rule: Vec<AnalysisRule>,
        }

        let file: RulesFile = toml::from_str(content).map_err(|e| {
            GuardError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(file.rule)
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}
