use crate::error_code::ErrorKind;
use crate::transport::TransportError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Structured error context for configuration and decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Config key that caused the error (e.g., "messages", "model")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type)
    pub details: Option<String>,
    /// Source of the error (e.g., "chat_command", "resolver")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Internal error type for the connector.
///
/// Entry points never hand this out directly; it is folded into an
/// [`ExecutionError`] at the outer boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Datasource authentication error: {message}")]
    Authentication { message: String },

    #[error("Datasource error: {message}")]
    Datasource { message: String },

    #[error("Unsupported operation: {kind}")]
    UnsupportedOperation { kind: String },

    #[error("Malformed configuration: {message}{}", format_context(.context))]
    MalformedConfiguration {
        message: String,
        context: ErrorContext,
    },

    #[error("Response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Query failed to execute: HTTP {status}")]
    RemoteExecution { status: u16, body: Value },

    #[error("Failed to fetch models: HTTP {status}")]
    Discovery { status: u16 },

    #[error("Unexpected model list structure: {message}")]
    DiscoveryStructure { message: String },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn malformed(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedConfiguration {
            message: msg.into(),
            context,
        }
    }

    /// Taxonomy kind reported to the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Datasource { .. } => ErrorKind::Datasource,
            Error::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Error::MalformedConfiguration { .. } => ErrorKind::MalformedConfiguration,
            Error::ResponseParse { .. } => ErrorKind::ResponseParse,
            Error::RemoteExecution { .. } => ErrorKind::RemoteExecution,
            Error::Discovery { .. } => ErrorKind::Discovery,
            Error::DiscoveryStructure { .. } => ErrorKind::DiscoveryStructure,
            Error::Transport(_) | Error::Serialization(_) => ErrorKind::Plugin,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::MalformedConfiguration { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// Caller-facing error value carried by results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub kind: ErrorKind,
    pub message: String,
    /// Raw response text or parsed body, when the upstream produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ExecutionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<Error> for ExecutionError {
    fn from(err: Error) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let detail = match err {
            Error::Authentication { message } | Error::Datasource { message }
                if !message.is_empty() =>
            {
                Some(Value::String(message))
            }
            Error::RemoteExecution { body, .. } => Some(body),
            _ => None,
        };
        ExecutionError {
            kind,
            message,
            detail,
        }
    }
}
