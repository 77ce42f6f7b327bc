use super::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::ConnectorConfig;
use async_trait::async_trait;
use reqwest::Proxy;
use std::time::Duration;

/// reqwest-backed transport. Deadlines are enforced here, not by the core.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ConnectorConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(config.pool_idle_timeout_secs)));

        if let Some(proxy_url) = config.proxy_url.as_deref() {
            let proxy = Proxy::all(proxy_url).map_err(|e| TransportError::Other(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, request.url)
            .bearer_auth(request.credential.expose())
            .header("x-connector-request-id", request.request_id);

        if let Some(body) = request.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok(HttpResponse { status, body })
    }
}
