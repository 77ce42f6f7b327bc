//! Caller-supplied inputs: credential, action and trigger requests.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bearer-token secret supplied by the caller.
///
/// `Debug` output is redacted; the raw value is only read when the
/// Authorization header is attached and when the cache key is derived.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    /// Read the credential from an environment variable.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(Self::bearer)
    }

    pub(crate) fn expose(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("token", &"[REDACTED]").finish()
    }
}

/// Generic description of one action to execute.
///
/// The operation kind is either declared explicitly in `command`, or inside the
/// configuration payload as `command` / `command.data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub config: Value,
}

impl ActionRequest {
    pub fn new(command: impl Into<String>, config: Value) -> Self {
        Self {
            command: Some(command.into()),
            config,
        }
    }

    /// Build a request whose kind is read from the payload itself.
    pub fn from_config(config: Value) -> Self {
        Self {
            command: None,
            config,
        }
    }

    /// Declared operation tag, if any.
    pub fn declared_command(&self) -> Option<&str> {
        if let Some(c) = self.command.as_deref() {
            return Some(c);
        }
        match self.config.get("command") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Object(obj)) => obj.get("data").and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

/// Metadata-fetch request (model discovery for a given generation kind).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub request_type: String,
}

impl TriggerRequest {
    pub fn new(request_type: impl Into<String>) -> Self {
        Self {
            request_type: request_type.into(),
        }
    }
}
