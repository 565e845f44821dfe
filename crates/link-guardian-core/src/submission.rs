//! Submission flow
//!
//! Tracks one URL check from input to result:
//! `idle -> submitting -> {success, error}`, with a new submission allowed
//! from any state. Each submission carries a generation ticket and only the
//! latest ticket may change the visible state, so an older response that
//! resolves late is discarded instead of overwriting a newer one.

use crate::client::{normalize_url, AnalysisBackend};
use crate::error::Result;
use crate::types::AnalysisResult;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Announcement published when a submission starts
pub const ANNOUNCE_STARTED: &str = "Starting URL analysis...";

/// Announcement published when results are ready
pub const ANNOUNCE_COMPLETE: &str = "URL analysis complete. Results are displayed below.";

/// Default lifetime of an announcement
pub const DEFAULT_ANNOUNCEMENT_TTL: Duration = Duration::from_secs(3);

/// Visible state of the submission form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet
    Idle,
    /// A request is in flight
    Submitting { url: String },
    /// The latest request produced a result
    Success,
    /// The latest submission failed
    Error { message: String },
}

impl SubmissionState {
    /// Whether the URL input accepts edits
    pub fn is_input_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// Message for the error banner
    pub fn banner(&self) -> Option<&str> {
        match self {
            SubmissionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Polite status message that clears itself after a while
#[derive(Debug, Clone)]
pub struct Announcer {
    message: Option<(String, Instant)>,
    ttl: Duration,
}

impl Announcer {
    pub fn new(ttl: Duration) -> Self {
        Self { message: None, ttl }
    }

    /// Replace the current announcement
    pub fn announce(&mut self, message: impl Into<String>) {
        self.announce_at(message, Instant::now());
    }

    pub fn announce_at(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some((message.into(), now));
    }

    /// Current announcement, if it has not expired yet
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&str> {
        let (message, published) = self.message.as_ref()?;
        if now.saturating_duration_since(*published) < self.ttl {
            Some(message)
        } else {
            None
        }
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOUNCEMENT_TTL)
    }
}

/// Handle for an in-flight submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    url: String,
}

impl Ticket {
    /// Trimmed URL that should be sent
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome became the visible state
    Applied,
    /// A newer submission was issued; the outcome was discarded
    Stale,
}

/// Synchronous state machine behind a session
#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    state: SubmissionState,
    generation: u64,
    current: Option<AnalysisResult>,
    announcer: Announcer,
}

impl SubmissionFlow {
    pub fn new(announcement_ttl: Duration) -> Self {
        Self {
            state: SubmissionState::Idle,
            generation: 0,
            current: None,
            announcer: Announcer::new(announcement_ttl),
        }
    }

    /// Start a submission
    ///
    /// Empty or whitespace input is rejected without issuing a ticket; the
    /// rejection does not invalidate a request that is already in flight.
    /// While one is in flight the form stays in `Submitting` and the message
    /// only goes to the announcer.
    pub fn begin(&mut self, input: &str) -> Result<Ticket> {
        let url = match normalize_url(input) {
            Ok(url) => url.to_string(),
            Err(e) => {
                let message = e.to_string();
                self.announcer.announce(message.clone());
                if !self.state.is_submitting() {
                    self.state = SubmissionState::Error { message };
                }
                return Err(e);
            }
        };

        self.generation += 1;
        self.state = SubmissionState::Submitting { url: url.clone() };
        self.announcer.announce(ANNOUNCE_STARTED);
        debug!("Submission {} started for {}", self.generation, url);

        Ok(Ticket {
            generation: self.generation,
            url,
        })
    }

    /// Apply the outcome of a submission if it is still the latest one
    ///
    /// A failure leaves the previously displayed result in place.
    pub fn finish(&mut self, ticket: &Ticket, outcome: &Result<AnalysisResult>) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale response {} (latest is {})",
                ticket.generation, self.generation
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(result) => {
                self.current = Some(result.clone());
                self.state = SubmissionState::Success;
                self.announcer.announce(ANNOUNCE_COMPLETE);
            }
            Err(e) => {
                let message = e.to_string();
                self.announcer.announce(format!("Error: {}", message));
                self.state = SubmissionState::Error { message };
            }
        }
        Completion::Applied
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Result currently on display
    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    /// Generation of the latest issued ticket
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn announcement(&self) -> Option<&str> {
        self.announcer.current()
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOUNCEMENT_TTL)
    }
}

/// A submission flow bound to a backend
///
/// The lock is only held between awaits, so overlapping `submit` calls are
/// possible; the generation guard decides which one wins.
pub struct Session {
    backend: Arc<dyn AnalysisBackend>,
    flow: Mutex<SubmissionFlow>,
}

impl Session {
    pub fn new(backend: Arc<dyn AnalysisBackend>, flow: SubmissionFlow) -> Self {
        Self {
            backend,
            flow: Mutex::new(flow),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionFlow> {
        self.flow.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submit a URL and wait for its outcome
    ///
    /// Returns the backend error when the submission was the latest one and
    /// failed; stale outcomes are reported as `Completion::Stale`.
    pub async fn submit(&self, input: &str) -> Result<Completion> {
        let ticket = self.lock().begin(input)?;
        info!("Analyzing {} with {} backend", ticket.url(), self.backend.name());

        let outcome = self.backend.analyze(ticket.url()).await;
        let completion = self.lock().finish(&ticket, &outcome);

        match (completion, outcome) {
            (Completion::Applied, Err(e)) => {
                warn!("Analysis failed: {}", e);
                Err(e)
            }
            (completion, _) => Ok(completion),
        }
    }

    /// Run a closure against the current flow state
    pub fn with_flow<R>(&self, f: impl FnOnce(&SubmissionFlow) -> R) -> R {
        let flow = self.lock();
        f(&flow)
    }

    pub fn state(&self) -> SubmissionState {
        self.with_flow(|flow| flow.state().clone())
    }

    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.with_flow(|flow| flow.current_result().cloned())
    }

    pub fn generation(&self) -> u64 {
        self.with_flow(SubmissionFlow::generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GuardError, EMPTY_URL_MESSAGE};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn result_for(url: &str, level: &str) -> AnalysisResult {
        AnalysisResult::from_response(url, json!({"final_decision": {"level": level}}))
    }

    /// Backend whose responses are released by the test
    struct GatedBackend {
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<AnalysisResult>>>>,
        calls: AtomicUsize,
    }

    impl GatedBackend {
        fn new() -> Self {
            Self {
                gates: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn gate(&self, url: &str) -> oneshot::Sender<Result<AnalysisResult>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(url.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl AnalysisBackend for GatedBackend {
        async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rx = self.gates.lock().unwrap().remove(url);
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(GuardError::Network("gate dropped".into()))),
                None => Ok(result_for(url, "safe")),
            }
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    async fn wait_for_generation(session: &Session, generation: u64) {
        while session.generation() < generation {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_flow_transitions() {
        let mut flow = SubmissionFlow::default();
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert!(flow.state().is_input_enabled());

        let ticket = flow.begin("  https://example.com ").unwrap();
        assert_eq!(ticket.url(), "https://example.com");
        assert!(flow.state().is_submitting());
        assert!(!flow.state().is_input_enabled());
        assert_eq!(flow.announcement(), Some(ANNOUNCE_STARTED));

        let outcome = Ok(result_for("https://example.com", "safe"));
        assert_eq!(flow.finish(&ticket, &outcome), Completion::Applied);
        assert_eq!(flow.state(), &SubmissionState::Success);
        assert_eq!(flow.announcement(), Some(ANNOUNCE_COMPLETE));
        assert!(flow.current_result().is_some());
    }

    #[test]
    fn test_empty_input_rejected_inline() {
        let mut flow = SubmissionFlow::default();
        let err = flow.begin(" \t ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(flow.generation(), 0);
        assert_eq!(flow.state().banner(), Some(EMPTY_URL_MESSAGE));
    }

    #[test]
    fn test_empty_input_while_in_flight_keeps_submitting() {
        let mut flow = SubmissionFlow::default();
        let ticket = flow.begin("https://a.example").unwrap();

        assert!(flow.begin("   ").unwrap_err().is_validation());
        assert!(flow.state().is_submitting());
        assert!(!flow.state().is_input_enabled());
        assert_eq!(flow.state().banner(), None);
        assert_eq!(flow.announcement(), Some(EMPTY_URL_MESSAGE));

        let outcome = Ok(result_for("https://a.example", "safe"));
        assert_eq!(flow.finish(&ticket, &outcome), Completion::Applied);
        assert_eq!(flow.state(), &SubmissionState::Success);
    }

    #[test]
    fn test_error_keeps_previous_result() {
        let mut flow = SubmissionFlow::default();
        let first = flow.begin("https://a.example").unwrap();
        flow.finish(&first, &Ok(result_for("https://a.example", "suspect")));

        let second = flow.begin("https://b.example").unwrap();
        let failure = Err(GuardError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        });
        assert_eq!(flow.finish(&second, &failure), Completion::Applied);

        assert_eq!(
            flow.state().banner(),
            Some("Analysis failed: Internal Server Error")
        );
        assert_eq!(
            flow.announcement(),
            Some("Error: Analysis failed: Internal Server Error")
        );
        assert_eq!(flow.current_result().unwrap().url, "https://a.example");
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let mut flow = SubmissionFlow::default();
        let old = flow.begin("https://old.example").unwrap();
        let new = flow.begin("https://new.example").unwrap();

        assert_eq!(
            flow.finish(&new, &Ok(result_for("https://new.example", "safe"))),
            Completion::Applied
        );
        assert_eq!(
            flow.finish(&old, &Ok(result_for("https://old.example", "malicious"))),
            Completion::Stale
        );
        assert_eq!(flow.current_result().unwrap().url, "https://new.example");
    }

    #[test]
    fn test_announcement_expires() {
        let start = Instant::now();
        let mut announcer = Announcer::new(Duration::from_secs(3));
        announcer.announce_at("hello", start);

        assert_eq!(announcer.current_at(start + Duration::from_secs(2)), Some("hello"));
        assert_eq!(announcer.current_at(start + Duration::from_secs(3)), None);
    }

    #[tokio::test]
    async fn test_session_empty_input_issues_no_request() {
        let backend = Arc::new(GatedBackend::new());
        let session = Session::new(backend.clone(), SubmissionFlow::default());

        let err = session.submit("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_session_malicious_result() {
        let backend = Arc::new(GatedBackend::new());
        let gate = backend.gate("https://bad.example");
        gate.send(Ok(result_for("https://bad.example", "malicious")))
            .unwrap();
        let session = Session::new(backend, SubmissionFlow::default());

        let completion = session.submit("https://bad.example").await.unwrap();
        assert_eq!(completion, Completion::Applied);

        let display = crate::verdict::map_verdict(
            session.current_result().unwrap().decision_level(),
        );
        assert_eq!(display.score, 17);
        assert_eq!(display.risk_label, "High");
        assert_eq!(display.recommendation, "Do Not Visit");
        assert_eq!(display.score_tone, crate::types::Tone::Red);
    }

    #[tokio::test]
    async fn test_latest_submission_wins_when_older_resolves_last() {
        let backend = Arc::new(GatedBackend::new());
        let gate_a = backend.gate("https://a.example");
        let gate_b = backend.gate("https://b.example");
        let session = Arc::new(Session::new(backend, SubmissionFlow::default()));

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("https://a.example").await }
        });
        wait_for_generation(&session, 1).await;

        let second = tokio::spawn({
            let session = session.clone();
            async move { session.submit("https://b.example").await }
        });
        wait_for_generation(&session, 2).await;

        gate_b
            .send(Ok(result_for("https://b.example", "safe")))
            .unwrap();
        assert_eq!(second.await.unwrap().unwrap(), Completion::Applied);

        gate_a
            .send(Ok(result_for("https://a.example", "malicious")))
            .unwrap();
        assert_eq!(first.await.unwrap().unwrap(), Completion::Stale);

        let current = session.current_result().unwrap();
        assert_eq!(current.url, "https://b.example");
        assert_eq!(current.decision_level(), Some("safe"));
        assert_eq!(session.state(), SubmissionState::Success);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_raise_banner() {
        let backend = Arc::new(GatedBackend::new());
        let gate_a = backend.gate("https://a.example");
        let session = Arc::new(Session::new(backend, SubmissionFlow::default()));

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("https://a.example").await }
        });
        wait_for_generation(&session, 1).await;

        session.submit("https://b.example").await.unwrap();

        gate_a
            .send(Err(GuardError::Network("connection reset".into())))
            .unwrap();
        assert_eq!(first.await.unwrap().unwrap(), Completion::Stale);
        assert_eq!(session.state(), SubmissionState::Success);
        assert_eq!(session.current_result().unwrap().url, "https://b.example");
    }
}
