//! `execute` against a mockito server.

use crate::support::{FailingTransport, MockServerFixture, ScriptedTransport, TOKEN};
use mockito::Matcher;
use openai_connector::{ActionRequest, Connector, ConnectorConfig, Credential, ErrorKind};
use serde_json::json;
use std::sync::Arc;

fn chat_request() -> ActionRequest {
    ActionRequest::new(
        "CHAT",
        json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Hello"}],
            "temperature": 0.2
        }),
    )
}

#[tokio::test]
async fn test_chat_success_returns_parsed_body() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"chatcmpl-1","choices":[{"message":{"role":"assistant","content":"Hi"}}]}"#)
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(&Credential::bearer(TOKEN), &chat_request())
        .await;

    mock.assert_async().await;
    assert!(result.is_execution_success, "{result:?}");
    assert_eq!(result.status_code, Some(200));
    assert!(result.error.is_none());
    assert_eq!(
        result.body.as_ref().unwrap()["choices"][0]["message"]["content"],
        "Hi"
    );

    let echo = result.request.expect("request echo");
    assert_eq!(echo.method, "POST");
    assert!(echo.url.ends_with("/v1/chat/completions"));
    assert_eq!(echo.headers["Authorization"], "Bearer ****");
    assert!(!serde_json::to_string(&echo).unwrap().contains(TOKEN));
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body("Incorrect API key provided")
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(&Credential::bearer("sk-wrong"), &chat_request())
        .await;

    assert!(!result.is_execution_success);
    assert!(result.body.is_none());
    assert_eq!(result.status_code, Some(401));
    let err = result.error.unwrap();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.detail, Some(json!("Incorrect API key provided")));
}

#[tokio::test]
async fn test_rate_limit_is_datasource_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(&Credential::bearer(TOKEN), &chat_request())
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Datasource));
    assert_eq!(result.error.unwrap().detail, Some(json!("slow down")));
}

#[tokio::test]
async fn test_success_status_with_invalid_json_is_parse_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(&Credential::bearer(TOKEN), &chat_request())
        .await;

    assert!(!result.is_execution_success);
    assert_eq!(result.error_kind(), Some(ErrorKind::ResponseParse));
}

#[tokio::test]
async fn test_server_error_with_json_is_remote_execution_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body(r#"{"error":{"message":"internal"}}"#)
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(&Credential::bearer(TOKEN), &chat_request())
        .await;

    assert_eq!(result.status_code, Some(500));
    let err = result.error.unwrap();
    assert_eq!(err.kind, ErrorKind::RemoteExecution);
    assert_eq!(err.detail, Some(json!({"error": {"message": "internal"}})));
}

#[tokio::test]
async fn test_embedding_request_reaches_embeddings_endpoint() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/embeddings")
        .match_body(Matcher::PartialJson(json!({
            "model": "text-embedding-3-small",
            "input": ["a", "b"]
        })))
        .with_status(200)
        .with_body(r#"{"object":"list","data":[]}"#)
        .create_async()
        .await;

    let result = fixture
        .connector()
        .execute(
            &Credential::bearer(TOKEN),
            &ActionRequest::from_config(json!({
                "command": {"data": "EMBEDDING"},
                "model": {"data": "text-embedding-3-small"},
                "input": ["a", "b"]
            })),
        )
        .await;

    mock.assert_async().await;
    assert!(result.is_execution_success, "{result:?}");
}

#[tokio::test]
async fn test_unknown_command_never_dispatches() {
    let transport = ScriptedTransport::new(200, "{}");
    let connector = Connector::builder()
        .config(ConnectorConfig::default())
        .transport(transport.clone())
        .build()
        .unwrap();

    let result = connector
        .execute(
            &Credential::bearer(TOKEN),
            &ActionRequest::new("TRANSCRIBE", json!({})),
        )
        .await;

    assert_eq!(transport.calls(), 0);
    assert_eq!(result.error_kind(), Some(ErrorKind::UnsupportedOperation));
    assert!(result.request.is_none());
    assert!(result.status_code.is_none());
}

#[tokio::test]
async fn test_malformed_configuration_never_dispatches() {
    let transport = ScriptedTransport::new(200, "{}");
    let connector = Connector::builder()
        .config(ConnectorConfig::default())
        .transport(transport.clone())
        .build()
        .unwrap();

    let result = connector
        .execute(
            &Credential::bearer(TOKEN),
            &ActionRequest::new("CHAT", json!({"model": "gpt-4o", "messages": []})),
        )
        .await;

    assert_eq!(transport.calls(), 0);
    assert_eq!(result.error_kind(), Some(ErrorKind::MalformedConfiguration));
    assert!(result.request.is_some());
}

#[tokio::test]
async fn test_transport_failure_is_plugin_error() {
    let connector = Connector::builder()
        .config(ConnectorConfig::default())
        .transport(Arc::new(FailingTransport))
        .build()
        .unwrap();

    let result = connector
        .execute(&Credential::bearer(TOKEN), &chat_request())
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Plugin));
    assert!(result.status_code.is_none());
    assert!(result.request.is_some());
}

#[tokio::test]
async fn test_request_body_is_forwarded_to_transport() {
    let transport = ScriptedTransport::new(200, r#"{"created":1,"data":[]}"#);
    let connector = Connector::builder()
        .config(ConnectorConfig::default())
        .base_url_override("https://proxy.internal/openai/")
        .transport(transport.clone())
        .build()
        .unwrap();

    let result = connector
        .execute(
            &Credential::bearer(TOKEN),
            &ActionRequest::new("IMAGE", json!({"model": "dall-e-3", "prompt": "a lighthouse"})),
        )
        .await;

    assert!(result.is_execution_success, "{result:?}");
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].url, "https://proxy.internal/openai/v1/images/generations");
    assert_eq!(sent[0].body.as_ref().unwrap()["prompt"], "a lighthouse");
}
