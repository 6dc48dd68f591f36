//! ragdesk-client — HTTP client for the external RAG backend.
//!
//! The backend exposes two calls:
//!   POST {base}/initialize — JSON array of chapter file names
//!   POST {base}/query      — {"question": "..."} → answer + sources
//!
//! One attempt per call: no retry, no backoff. A timeout is applied only when
//! `backend.timeout_secs` is configured.

use async_trait::async_trait;
use ragdesk_common::{QueryRequest, QueryResult};
use ragdesk_config::BackendConfig;
use thiserror::Error;
use tracing::{debug, warn};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} returned by {url}")]
    Status { status: u16, url: String, body: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait RagBackend: Send + Sync {
    /// Ask the backend to load the named chapter files.
    async fn initialize(&self, file_names: &[String]) -> Result<(), BackendError>;
    /// Ask a question against the loaded chapters.
    async fn query(&self, question: &str) -> Result<QueryResult, BackendError>;
    /// Base URL shown to users in the help text.
    fn base_url(&self) -> &str;
}

// ── HTTP implementation ───────────────────────────────────────────────────────

pub struct HttpRagBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRagBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Fail on any non-2xx status, keeping a short body excerpt for the logs.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let body: String = resp.text().await.unwrap_or_default().chars().take(500).collect();
    warn!(status = status.as_u16(), %url, %body, "backend rejected request");
    Err(BackendError::Status { status: status.as_u16(), url, body })
}

#[async_trait]
impl RagBackend for HttpRagBackend {
    async fn initialize(&self, file_names: &[String]) -> Result<(), BackendError> {
        let url = self.endpoint("initialize");
        debug!(%url, files = file_names.len(), "initializing backend");
        let resp = self.client.post(&url).json(file_names).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn query(&self, question: &str) -> Result<QueryResult, BackendError> {
        let url = self.endpoint("query");
        debug!(%url, "querying backend");
        let resp = self
            .client
            .post(&url)
            .json(&QueryRequest::new(question))
            .send()
            .await?;
        let bytes = check_status(resp).await?.bytes().await?;
        let result: QueryResult = serde_json::from_slice(&bytes)?;
        debug!(sources = result.sources.len(), "query answered");
        Ok(result)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpRagBackend::new(&BackendConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:9000");
        assert_eq!(backend.endpoint("query"), "http://localhost:9000/query");
    }

    #[test]
    fn test_status_error_message_names_status_and_url() {
        let err = BackendError::Status {
            status: 503,
            url: "http://backend/query".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "503 returned by http://backend/query");
    }
}
