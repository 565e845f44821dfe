//! Link Guardian Core Library
//!
//! Client-side core of the Link Guardian URL checker: the analysis-result
//! contract exchanged with a remote `/analyze` service, the mapping from
//! the backend's verdict to display attributes, provider filtering, and the
//! submission flow that guards against out-of-order responses.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod rules;
pub mod sources;
pub mod submission;
pub mod types;
pub mod verdict;

pub use client::{AnalysisBackend, DemoBackend, HttpBackend};
pub use config::GuardConfig;
pub use error::{GuardError, Result};
pub use report::ResultsView;
pub use submission::{Completion, Session, SubmissionFlow, SubmissionState};
pub use types::*;
pub use verdict::{map_verdict, VerdictDisplay, VerdictLevel};

use std::sync::Arc;
use tracing::info;

/// Session and display settings built from a configuration
pub struct Guardian {
    session: Arc<Session>,
    mode: DisplayMode,
    demo_rules: Vec<AnalysisRule>,
}

impl Guardian {
    /// Create a guardian from configuration
    pub fn new(config: &GuardConfig) -> Result<Self> {
        let backend = config.backend()?;
        let demo_rules = config.demo_rules()?;
        info!("Using {} backend in {} mode", backend.name(), config.mode);

        Ok(Self {
            session: Arc::new(Session::new(backend, config.flow())),
            mode: config.mode,
            demo_rules,
        })
    }

    /// Create a guardian around an existing backend
    pub fn with_backend(backend: Arc<dyn AnalysisBackend>, mode: DisplayMode) -> Self {
        Self {
            session: Arc::new(Session::new(backend, SubmissionFlow::default())),
            mode,
            demo_rules: rules::demo_rules(),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Submit a URL and return the view of the displayed result
    ///
    /// A stale completion yields the view of whatever is displayed now.
    pub async fn check(&self, input: &str) -> Result<Option<ResultsView>> {
        self.session.submit(input).await?;
        Ok(self.current_view())
    }

    /// View of the result currently on display
    pub fn current_view(&self) -> Option<ResultsView> {
        self.session
            .current_result()
            .map(|result| ResultsView::build(&result, self.mode, &self.demo_rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_guardian_requires_origin_in_live_mode() {
        assert!(Guardian::new(&GuardConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_demo_check() {
        let guardian = Guardian::with_backend(
            Arc::new(DemoBackend::new(Duration::ZERO)),
            DisplayMode::Demo,
        );
        let view = guardian.check(" https://example.com ").await.unwrap().unwrap();
        assert_eq!(view.url, "https://example.com");
        assert!(view.is_demo());
        assert_eq!(view.sources.len(), 3);
    }

    #[tokio::test]
    async fn test_check_rejects_empty() {
        let guardian = Guardian::with_backend(
            Arc::new(DemoBackend::new(Duration::ZERO)),
            DisplayMode::Live,
        );
        assert!(guardian.check("").await.unwrap_err().is_validation());
        assert!(guardian.current_view().is_none());
    }
}
