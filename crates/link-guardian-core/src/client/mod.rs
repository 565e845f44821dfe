//! Analysis backend clients
//!
//! The only wire contract is `POST {origin}/analyze` with a `{"url": ...}`
//! JSON body. The response body is passed through largely as-is.

mod demo;

pub use demo::DemoBackend;

use crate::error::{GuardError, Result};
use crate::types::AnalysisResult;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Something that can analyze a URL
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze an already trimmed, non-empty URL
    async fn analyze(&self, url: &str) -> Result<AnalysisResult>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

/// Trim the submitted URL, rejecting empty input
pub fn normalize_url(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GuardError::empty_url());
    }
    Ok(trimmed)
}

/// Check and normalize a backend origin ("http://host:port")
pub fn normalize_origin(origin: &str) -> Result<String> {
    let origin = origin.trim().trim_end_matches('/');
    let host = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| {
            GuardError::Config(format!(
                "Backend origin must start with http:// or https://: '{}'",
                origin
            ))
        })?;
    if host.is_empty() {
        return Err(GuardError::Config("Backend origin has no host".to_string()));
    }
    Ok(origin.to_string())
}

/// HTTP client for a remote analysis service
pub struct HttpBackend {
    origin: String,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for the given origin
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let origin = normalize_origin(origin)?;
        let http_client = reqwest::Client::builder()
            .user_agent(format!("link-guard/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(|e| GuardError::Network(e.to_string()))?;

        Ok(Self {
            origin,
            http_client,
        })
    }

    /// Endpoint the client posts to
    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.origin)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        let url = normalize_url(url)?;
        let endpoint = self.endpoint();
        debug!("Posting {} to {}", url, endpoint);

        let response = self
            .http_client
            .post(&endpoint)
            .json(&AnalyzeRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuardError::Http {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or_else(|| status.as_str())
                    .to_string(),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| GuardError::Decode(e.to_string()))?;

        Ok(AnalysisResult::from_response(url, body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(origin: &str) -> HttpBackend {
        HttpBackend::new(origin, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("  https://a.example \n").unwrap(), "https://a.example");
        assert!(normalize_url("   ").unwrap_err().is_validation());
        assert!(normalize_url("").unwrap_err().is_validation());
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(
            normalize_origin("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert!(normalize_origin("localhost:8000").is_err());
        assert!(normalize_origin("https://").is_err());
    }

    #[tokio::test]
    async fn test_posts_trimmed_url_and_returns_body() {
        let router = Router::new().route(
            "/analyze",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "echo": body["url"],
                    "final_decision": {"level": "malicious", "reasons": []}
                }))
            }),
        );
        let origin = spawn_backend(router).await;

        let result = client(&origin)
            .analyze("  https://phish.example/login  ")
            .await
            .unwrap();

        assert_eq!(result.url, "https://phish.example/login");
        assert_eq!(result.body["echo"], json!("https://phish.example/login"));
        assert_eq!(result.decision_level(), Some("malicious"));
    }

    #[tokio::test]
    async fn test_non_success_uses_status_text() {
        let router = Router::new().route(
            "/analyze",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let origin = spawn_backend(router).await;

        let err = client(&origin).analyze("https://a.example").await.unwrap_err();
        match &err {
            GuardError::Http { status, status_text } => {
                assert_eq!(*status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "Analysis failed: Internal Server Error");
    }

    #[tokio::test]
    async fn test_nonstandard_status_falls_back_to_code() {
        let router = Router::new().route(
            "/analyze",
            post(|| async { (StatusCode::from_u16(599).unwrap(), "busy") }),
        );
        let origin = spawn_backend(router).await;

        let err = client(&origin).analyze("https://a.example").await.unwrap_err();
        assert_eq!(err.to_string(), "Analysis failed: 599");
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let router = Router::new().route("/analyze", post(|| async { "not json" }));
        let origin = spawn_backend(router).await;

        let err = client(&origin).analyze("https://a.example").await.unwrap_err();
        assert!(matches!(err, GuardError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .analyze("https://a.example")
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_url_rejected_before_request() {
        // Nothing listens on this origin; validation must fail first.
        let err = client("http://127.0.0.1:9").analyze("   ").await.unwrap_err();
        assert!(err.is_validation());
    }
}
