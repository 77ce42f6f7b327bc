//! Shared fixtures: mockito server and a scripted in-process transport.

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use openai_connector::cache::{DiscoveryCache, ManualClock};
use openai_connector::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use openai_connector::{Connector, ConnectorConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "sk-test-token";

/// Test fixture that manages a mock server and a private cache.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub cache: Arc<DiscoveryCache>,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
            cache: Arc::new(DiscoveryCache::new()),
        }
    }

    /// Connector pointed at the mock server.
    pub fn connector(&self) -> Connector {
        Connector::builder()
            .config(ConnectorConfig::default())
            .base_url_override(self.server.url())
            .discovery_cache(self.cache.clone())
            .build()
            .expect("build connector")
    }
}

/// One recorded outbound request.
#[derive(Debug, Clone)]
pub struct Sent {
    pub method: String,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// Transport that replays a fixed response and counts dispatches.
pub struct ScriptedTransport {
    status: u16,
    body: String,
    delay: Option<Duration>,
    calls: AtomicUsize,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            delay: None,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(status: u16, body: impl Into<String>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(Sent {
            method: request.method.to_string(),
            url: request.url.to_string(),
            body: request.body.cloned(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(HttpResponse::new(self.status, self.body.clone()))
    }
}

/// Transport that always fails before any response.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Other("connection refused".into()))
    }
}

/// Connector over an injected transport with a manually driven cache clock.
pub fn scripted_connector(transport: Arc<dyn Transport>) -> (Connector, Arc<DiscoveryCache>, ManualClock) {
    let clock = ManualClock::new();
    let cache = Arc::new(DiscoveryCache::with_clock(Arc::new(clock.clone())));
    let connector = Connector::builder()
        .config(ConnectorConfig::default())
        .transport(transport)
        .discovery_cache(cache.clone())
        .build()
        .expect("build connector");
    (connector, cache, clock)
}

pub const MODEL_LIST: &str = r#"{
  "object": "list",
  "data": [
    {"id": "gpt-4o", "object": "model", "owned_by": "system"},
    {"id": "gpt-3.5-turbo", "object": "model", "owned_by": "openai"},
    {"id": "gpt-4o-mini", "object": "model", "owned_by": "system"},
    {"id": "gpt-3.5-turbo-instruct", "object": "model", "owned_by": "system"},
    {"id": "text-embedding-3-small", "object": "model", "owned_by": "system"},
    {"id": "dall-e-3", "object": "model", "owned_by": "system"},
    {"object": "model", "owned_by": "system"}
  ]
}"#;
