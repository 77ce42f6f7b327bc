//! 传输层：发送带 Bearer 认证的 HTTP 请求。
//!
//! Transport seam. The core only needs `send(method, url, credential, body)`;
//! [`HttpTransport`] is the production implementation, tests inject their own.

mod http;

pub use http::HttpTransport;

use crate::types::Credential;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// One outbound request. The credential is attached as a bearer header only.
#[derive(Debug)]
pub struct HttpRequest<'a> {
    pub method: Method,
    pub url: Url,
    pub credential: &'a Credential,
    pub body: Option<&'a Value>,
    pub request_id: &'a str,
}

/// Status and raw body as received.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Body as text, lossy for non UTF-8 bytes.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest<'_>) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
