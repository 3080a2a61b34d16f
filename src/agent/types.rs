//! Agent types — wire format, errors, and reply classification.
//!
//! The remote agent speaks one contract: a `generate` request carrying the
//! user's message, answered by a JSON object with a `text` field. Everything
//! the widget needs to know about an answer is folded into [`AgentReply`].

use serde::{Deserialize, Serialize};

/// Shown when the agent answered but gave no usable `text`.
pub const FALLBACK_REPLY: &str = "Sorry, I had trouble processing your request.";

/// Shown when the request failed outright.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by agent client operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("agent request failed: {0}")]
    Request(String),

    /// The agent returned a non-success HTTP status.
    #[error("agent response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("agent response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// A single message in a `generate` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/agents/{agent}/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub messages: Vec<AgentMessage>,
}

impl GenerateRequest {
    /// Build a request carrying one user message, content as typed.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self { messages: vec![AgentMessage { role: "user".into(), content: content.to_string() }] }
    }
}

// =============================================================================
// REPLY
// =============================================================================

/// Outcome of one request cycle. Every variant maps to exactly one
/// assistant message via [`AgentReply::content`].
#[derive(Debug)]
pub enum AgentReply {
    /// The agent answered with text.
    Text(String),
    /// The agent answered with JSON lacking a non-empty string `text`.
    MissingText,
    /// Transport failure, non-2xx status, or a body that is not JSON.
    Failed(AgentError),
}

impl AgentReply {
    /// Classify a successfully parsed response body.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Self {
        match body.get("text").and_then(serde_json::Value::as_str) {
            Some(text) if !text.is_empty() => Self::Text(text.to_string()),
            _ => Self::MissingText,
        }
    }

    /// Text of the assistant message this reply produces.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::MissingText => FALLBACK_REPLY,
            Self::Failed(_) => ERROR_REPLY,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<serde_json::Value, AgentError>> for AgentReply {
    fn from(result: Result<serde_json::Value, AgentError>) -> Self {
        match result {
            Ok(body) => Self::from_body(&body),
            Err(e) => Self::Failed(e),
        }
    }
}

// =============================================================================
// AGENT TRAIT
// =============================================================================

/// Async seam over the remote agent. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AgentGenerate: Send + Sync {
    /// Send one `generate` request to the named agent and return the
    /// parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if the request fails, the status is not
    /// 2xx, or the body is not JSON.
    async fn generate(&self, agent: &str, request: &GenerateRequest) -> Result<serde_json::Value, AgentError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
