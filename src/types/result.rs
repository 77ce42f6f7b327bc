//! Values handed to the result sink.

use crate::error::ExecutionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Header value shown in place of the bearer token.
pub const REDACTED: &str = "Bearer ****";

/// Observability copy of the outbound request. Never contains the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEcho {
    pub request_id: String,
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestEcho {
    pub fn new(
        request_id: impl Into<String>,
        method: &reqwest::Method,
        url: &url::Url,
        body: Option<&Value>,
    ) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), REDACTED.to_string());
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        Self {
            request_id: request_id.into(),
            method: method.as_str().to_string(),
            url: url.to_string(),
            headers,
            body: body.cloned(),
        }
    }
}

/// Uniform outcome of one `execute` call.
///
/// `success == true` implies `body.is_some() && error.is_none()`; a failed
/// result always carries `error` and never `body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub is_execution_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecutionError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestEcho>,
}

impl ExecutionResult {
    pub fn success(status: u16, body: Value) -> Self {
        Self {
            is_execution_success: true,
            status_code: Some(status),
            body: Some(body),
            error: None,
            request: None,
        }
    }

    pub fn failure(status: Option<u16>, error: ExecutionError) -> Self {
        Self {
            is_execution_success: false,
            status_code: status,
            body: None,
            error: Some(error),
            request: None,
        }
    }

    pub fn with_request(mut self, request: Option<RequestEcho>) -> Self {
        self.request = request;
        self
    }

    pub fn error_kind(&self) -> Option<crate::error_code::ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}
