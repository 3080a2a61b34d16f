use super::*;
use crate::agent::test_helpers::{spawn_mock_agent, unreachable_base_url};
use serde_json::json;

// =============================================================================
// URL building
// =============================================================================

#[test]
fn generate_url_joins_agent_path() {
    let client = AgentClient::new("http://localhost:4111/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:4111");
    assert_eq!(client.generate_url("resumeAgent"), "http://localhost:4111/api/agents/resumeAgent/generate");
}

// =============================================================================
// parse_generate_response
// =============================================================================

#[test]
fn parse_accepts_any_json() {
    assert_eq!(parse_generate_response(r#"{"text":"hi"}"#).unwrap(), json!({ "text": "hi" }));
    assert_eq!(parse_generate_response("[1,2]").unwrap(), json!([1, 2]));
}

#[test]
fn parse_rejects_non_json() {
    let err = parse_generate_response("<html>oops</html>").unwrap_err();
    assert!(matches!(err, AgentError::Parse(_)));
}

// =============================================================================
// generate against a live mock server
// =============================================================================

#[tokio::test]
async fn generate_posts_user_message_as_json() {
    let server = spawn_mock_agent(200, r#"{"text":"He has strong backend skills."}"#).await;
    let client = AgentClient::new(&server.base_url).unwrap();

    let body = client
        .generate("resumeAgent", &GenerateRequest::user("What skills does he have?"))
        .await
        .unwrap();
    assert_eq!(body, json!({ "text": "He has strong backend skills." }));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].agent, "resumeAgent");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, json!({ "messages": [{ "role": "user", "content": "What skills does he have?" }] }));
}

#[tokio::test]
async fn generate_maps_server_error_status() {
    let server = spawn_mock_agent(500, "internal error").await;
    let client = AgentClient::new(&server.base_url).unwrap();

    let err = client
        .generate("resumeAgent", &GenerateRequest::user("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Status { status: 500, ref body } if body == "internal error"));
}

#[tokio::test]
async fn generate_maps_non_json_success_to_parse_error() {
    let server = spawn_mock_agent(200, "not json").await;
    let client = AgentClient::new(&server.base_url).unwrap();

    let err = client
        .generate("resumeAgent", &GenerateRequest::user("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Parse(_)));
}

#[tokio::test]
async fn generate_maps_connection_failure_to_request_error() {
    let client = AgentClient::new(unreachable_base_url().await).unwrap();

    let err = client
        .generate("resumeAgent", &GenerateRequest::user("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Request(_)));
}

#[tokio::test]
async fn generate_uses_named_agent_in_path() {
    let server = spawn_mock_agent(200, r#"{"text":"ok"}"#).await;
    let client = AgentClient::new(&server.base_url).unwrap();

    client
        .generate("supportAgent", &GenerateRequest::user("hi"))
        .await
        .unwrap();
    assert_eq!(server.requests()[0].agent, "supportAgent");
}
