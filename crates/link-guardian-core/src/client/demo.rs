//! Offline backend for demo mode

use super::{normalize_url, AnalysisBackend};
use crate::error::Result;
use crate::types::AnalysisResult;
use async_trait::async_trait;
use std::time::Duration;

/// Backend that waits a fixed delay and echoes the URL with no findings
pub struct DemoBackend {
    delay: Duration,
}

impl DemoBackend {
    /// Create a demo backend with the given artificial delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl AnalysisBackend for DemoBackend {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        let url = normalize_url(url)?;
        tokio::time::sleep(self.delay).await;
        Ok(AnalysisResult::url_only(url))
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_demo_waits_then_echoes() {
        let backend = DemoBackend::default();
        let started = tokio::time::Instant::now();

        let result = backend.analyze(" https://example.com ").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(result.url, "https://example.com");
        assert!(result.body.is_empty());
    }

    #[tokio::test]
    async fn test_demo_validates_input() {
        let backend = DemoBackend::new(Duration::ZERO);
        assert!(backend.analyze("").await.unwrap_err().is_validation());
    }
}
