//! Agent — the remote conversational service behind the widget.
//!
//! DESIGN
//! ======
//! The widget talks to exactly one HTTP contract:
//! `POST {base_url}/api/agents/{agent}/generate`. `AgentClient` implements
//! it with reqwest; the `AgentGenerate` trait is the seam the widget
//! controller depends on, so tests can swap in a scripted agent.

pub mod client;
pub mod config;
pub mod types;

pub use client::AgentClient;
pub use config::{AgentConfig, ConfigError, DEFAULT_AGENT_ENDPOINT, FALLBACK_BASE_URL};
pub use types::{AgentError, AgentGenerate, AgentReply, ERROR_REPLY, FALLBACK_REPLY, GenerateRequest};

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Path, State};
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use super::*;

    /// One request as seen by the mock agent server.
    #[derive(Debug, Clone)]
    pub struct CapturedRequest {
        pub agent: String,
        pub content_type: Option<String>,
        pub body: String,
    }

    /// In-process agent server answering every `generate` call with a fixed
    /// status and body.
    pub struct MockAgentServer {
        pub base_url: String,
        pub captured: Arc<Mutex<Vec<CapturedRequest>>>,
    }

    impl MockAgentServer {
        pub fn requests(&self) -> Vec<CapturedRequest> {
            self.captured.lock().unwrap().clone()
        }
    }

    #[derive(Clone)]
    struct MockState {
        status: StatusCode,
        body: String,
        captured: Arc<Mutex<Vec<CapturedRequest>>>,
    }

    async fn generate(
        State(mock): State<MockState>,
        Path(agent): Path<String>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        mock.captured
            .lock()
            .unwrap()
            .push(CapturedRequest { agent, content_type, body });
        (mock.status, mock.body)
    }

    /// Spawn a mock agent server on an ephemeral local port.
    pub async fn spawn_mock_agent(status: u16, body: &str) -> MockAgentServer {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            captured: captured.clone(),
        };
        let app = Router::new()
            .route("/api/agents/{agent}/generate", post(generate))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        MockAgentServer { base_url: format!("http://{addr}"), captured }
    }

    /// Base URL of a local port with nothing listening on it.
    pub async fn unreachable_base_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    /// Agent double that replays queued results, optionally holding each
    /// call until [`ScriptedAgent::release`] is called.
    pub struct ScriptedAgent {
        replies: Mutex<VecDeque<Result<Value, AgentError>>>,
        gate: Option<Notify>,
        requests: Mutex<Vec<(String, GenerateRequest)>>,
    }

    impl ScriptedAgent {
        /// Answers immediately.
        pub fn immediate(replies: Vec<Result<Value, AgentError>>) -> Arc<Self> {
            Arc::new(Self { replies: Mutex::new(replies.into()), gate: None, requests: Mutex::new(Vec::new()) })
        }

        /// Answers only after `release()`.
        pub fn gated(replies: Vec<Result<Value, AgentError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                gate: Some(Notify::new()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        pub fn requests(&self) -> Vec<(String, GenerateRequest)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl AgentGenerate for ScriptedAgent {
        async fn generate(&self, agent: &str, request: &GenerateRequest) -> Result<Value, AgentError> {
            self.requests
                .lock()
                .unwrap()
                .push((agent.to_string(), request.clone()));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "text": "done" })))
        }
    }
}
