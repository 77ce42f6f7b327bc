//! `trigger` with an in-process transport and a manual clock.

use crate::support::{scripted_connector, MockServerFixture, ScriptedTransport, MODEL_LIST, TOKEN};
use openai_connector::{Credential, ErrorKind, TriggerRequest};
use std::time::Duration;

fn values(models: &[openai_connector::DisplayModel]) -> Vec<&str> {
    models.iter().map(|m| m.value.as_str()).collect()
}

#[tokio::test]
async fn test_chat_models_filtered_and_sorted() {
    let transport = ScriptedTransport::new(200, MODEL_LIST);
    let (connector, _cache, _clock) = scripted_connector(transport.clone());

    let models = connector
        .trigger(&Credential::bearer(TOKEN), &TriggerRequest::new("CHAT_MODELS"))
        .await
        .unwrap();

    assert_eq!(values(&models), vec!["gpt-3.5-turbo", "gpt-4o", "gpt-4o-mini"]);
    assert!(models.iter().all(|m| m.label == m.value));

    let sent = transport.sent();
    assert_eq!(sent[0].method, "GET");
    assert!(sent[0].url.ends_with("/v1/models"));
    assert!(sent[0].body.is_none());
}

#[tokio::test]
async fn test_same_credential_dispatches_once() {
    let transport = ScriptedTransport::new(200, MODEL_LIST);
    let (connector, cache, _clock) = scripted_connector(transport.clone());
    let credential = Credential::bearer(TOKEN);

    let chat = connector
        .trigger(&credential, &TriggerRequest::new("CHAT_MODELS"))
        .await
        .unwrap();
    let embeddings = connector
        .trigger(&credential, &TriggerRequest::new("EMBEDDING_MODELS"))
        .await
        .unwrap();
    let again = connector
        .trigger(&credential, &TriggerRequest::new("CHAT_MODELS"))
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(chat, again);
    assert_eq!(values(&embeddings), vec!["text-embedding-3-small"]);
}

#[tokio::test]
async fn test_distinct_credentials_are_isolated() {
    let transport = ScriptedTransport::new(200, MODEL_LIST);
    let (connector, cache, _clock) = scripted_connector(transport.clone());

    for token in ["sk-alpha", "sk-beta"] {
        connector
            .trigger(&Credential::bearer(token), &TriggerRequest::new("IMAGE_MODELS"))
            .await
            .unwrap();
    }

    assert_eq!(transport.calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let transport = ScriptedTransport::new(200, MODEL_LIST);
    let (connector, cache, clock) = scripted_connector(transport.clone());
    let credential = Credential::bearer(TOKEN);
    let request = TriggerRequest::new("CHAT_MODELS");

    connector.trigger(&credential, &request).await.unwrap();
    clock.advance(cache.ttl() - Duration::from_secs(1));
    connector.trigger(&credential, &request).await.unwrap();
    assert_eq!(transport.calls(), 1);

    clock.advance(Duration::from_secs(2));
    connector.trigger(&credential, &request).await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_missing_data_is_structure_error_and_still_cached() {
    let transport = ScriptedTransport::new(200, r#"{"object":"list"}"#);
    let (connector, cache, _clock) = scripted_connector(transport.clone());
    let credential = Credential::bearer(TOKEN);

    for _ in 0..2 {
        let err = connector
            .trigger(&credential, &TriggerRequest::new("CHAT_MODELS"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DiscoveryStructure);
    }
    assert_eq!(transport.calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_error_statuses_are_not_cached() {
    for (status, kind) in [(401, ErrorKind::Authentication), (403, ErrorKind::Authentication), (502, ErrorKind::Discovery)] {
        let transport = ScriptedTransport::new(status, r#"{"error":"nope"}"#);
        let (connector, cache, _clock) = scripted_connector(transport.clone());

        let err = connector
            .trigger(&Credential::bearer(TOKEN), &TriggerRequest::new("CHAT_MODELS"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, kind, "status {status}");
        assert!(cache.is_empty());
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let transport = ScriptedTransport::new(200, "<html>");
    let (connector, cache, _clock) = scripted_connector(transport);

    let err = connector
        .trigger(&Credential::bearer(TOKEN), &TriggerRequest::new("CHAT_MODELS"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ResponseParse);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_unknown_trigger_kind_never_dispatches() {
    let transport = ScriptedTransport::new(200, MODEL_LIST);
    let (connector, _cache, _clock) = scripted_connector(transport.clone());

    let err = connector
        .trigger(&Credential::bearer(TOKEN), &TriggerRequest::new("AUDIO_MODELS"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedOperation);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_cancelled_trigger_leaves_cache_empty() {
    let transport = ScriptedTransport::slow(200, MODEL_LIST, Duration::from_secs(30));
    let (connector, cache, _clock) = scripted_connector(transport.clone());

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        connector.trigger(&Credential::bearer(TOKEN), &TriggerRequest::new("CHAT_MODELS")),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(transport.calls(), 1);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_trigger_over_http() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/v1/models")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MODEL_LIST)
        .expect(1)
        .create_async()
        .await;

    let connector = fixture.connector();
    let credential = Credential::bearer(TOKEN);
    let first = connector
        .trigger(&credential, &TriggerRequest::new("COMPLETION_MODELS"))
        .await
        .unwrap();
    let second = connector
        .trigger(&credential, &TriggerRequest::new("VISION_MODELS"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(values(&first), vec!["gpt-3.5-turbo-instruct"]);
    assert_eq!(values(&second), vec!["gpt-4o", "gpt-4o-mini"]);
    assert_eq!(fixture.cache.stats().hits, 1);
}

#[tokio::test]
async fn test_concurrent_triggers_for_distinct_credentials() {
    let transport = ScriptedTransport::slow(200, MODEL_LIST, Duration::from_millis(20));
    let (connector, cache, _clock) = scripted_connector(transport.clone());
    let credentials: Vec<Credential> = (0..4)
        .map(|i| Credential::bearer(format!("sk-user-{i}")))
        .collect();
    let request = TriggerRequest::new("EMBEDDING_MODELS");

    let results = futures::future::join_all(
        credentials
            .iter()
            .map(|credential| connector.trigger(credential, &request)),
    )
    .await;

    for result in results {
        assert_eq!(values(&result.unwrap()), vec!["text-embedding-3-small"]);
    }
    assert_eq!(transport.calls(), 4);
    assert_eq!(cache.len(), 4);
}

#[tokio::test]
async fn test_concurrent_misses_for_one_credential_leave_one_entry() {
    let transport = ScriptedTransport::slow(200, MODEL_LIST, Duration::from_millis(20));
    let (connector, cache, _clock) = scripted_connector(transport.clone());
    let credential = Credential::bearer(TOKEN);
    let request = TriggerRequest::new("CHAT_MODELS");

    let (first, second) = futures::future::join(
        connector.trigger(&credential, &request),
        connector.trigger(&credential, &request),
    )
    .await;

    let first = first.unwrap();
    assert_eq!(first, second.unwrap());
    let dispatched = transport.calls();
    assert!((1..=2).contains(&dispatched), "dispatched {dispatched}");
    assert_eq!(cache.len(), 1);

    let third = connector.trigger(&credential, &request).await.unwrap();
    assert_eq!(third, first);
    assert_eq!(transport.calls(), dispatched);
}
