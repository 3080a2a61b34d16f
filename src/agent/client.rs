//! HTTP client for the remote agent's `generate` endpoint.
//!
//! One call, no retries, no widget-imposed timeout: reqwest's transport
//! defaults apply.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::debug;

use super::types::{AgentError, AgentGenerate, GenerateRequest};

pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    /// Build a client for the server at `base_url` (already resolved).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AgentError::HttpClientBuild(e.to_string()))?;
        Ok(Self::with_http(http, base_url))
    }

    /// Reuse an existing reqwest client, e.g. one shared by several widgets.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the named agent's `generate` endpoint.
    #[must_use]
    pub fn generate_url(&self, agent: &str) -> String {
        format!("{}/api/agents/{agent}/generate", self.base_url)
    }
}

#[async_trait::async_trait]
impl AgentGenerate for AgentClient {
    async fn generate(&self, agent: &str, request: &GenerateRequest) -> Result<serde_json::Value, AgentError> {
        let url = self.generate_url(agent);
        debug!(%url, "agent: sending generate request");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(AgentError::Status { status: status.as_u16(), body: text });
        }
        parse_generate_response(&text)
    }
}

/// Parse a 2xx response body. Any JSON value is accepted here; whether it
/// carries a usable `text` is decided by [`super::AgentReply`].
pub(crate) fn parse_generate_response(text: &str) -> Result<serde_json::Value, AgentError> {
    serde_json::from_str(text).map_err(|e| AgentError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
