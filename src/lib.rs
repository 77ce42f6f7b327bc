//! # openai-connector
//!
//! OpenAI 数据源连接器：执行生成类操作、发现可用模型并校验凭证。
//!
//! A connector that exposes the OpenAI HTTP API as a uniform "execute an
//! action / list models / test the credential" surface for a host platform.
//!
//! ## Overview
//!
//! Callers hand in a bearer [`Credential`] and a request. The connector picks
//! exactly one command variant from the declared kind, builds the HTTP
//! request, classifies the response into a fixed error taxonomy and returns a
//! uniform [`ExecutionResult`]. Model discovery goes through a per-credential
//! [`cache::DiscoveryCache`] so that repeated look-ups do not hit the API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_connector::{ActionRequest, Connector, Credential, TriggerRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> openai_connector::Result<()> {
//!     let connector = Connector::new()?;
//!     let credential = Credential::bearer("sk-...");
//!
//!     let models = connector
//!         .trigger(&credential, &TriggerRequest::new("CHAT_MODELS"))
//!         .await;
//!     println!("{:?}", models);
//!
//!     let result = connector
//!         .execute(
//!             &credential,
//!             &ActionRequest::new(
//!                 "CHAT",
//!                 json!({
//!                     "model": "gpt-4o-mini",
//!                     "messages": [{"role": "user", "content": "Hello"}]
//!                 }),
//!             ),
//!         )
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`Connector`] entry points and builder |
//! | [`commands`] | One command variant per API operation |
//! | [`resolver`] | Declared kind → command variant |
//! | [`discovery`] | Model filtering and ordering |
//! | [`cache`] | Per-credential model-list cache |
//! | [`transport`] | HTTP seam and reqwest implementation |
//! | [`config`] | Base URL, timeouts, proxy |
//! | [`types`] | Requests, results, messages, model records |
//! | [`error`] / [`error_code`] | Error taxonomy |

pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error_code;
pub mod resolver;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{validate_credential, Connector, ConnectorBuilder};
pub use commands::{CommandKind, OpenAiCommand};
pub use config::ConnectorConfig;
pub use error_code::ErrorKind;
pub use resolver::TriggerKind;
pub use types::{
    ActionRequest, Credential, DisplayModel, ExecutionResult, Message, MessageRole, RequestEcho,
    TriggerRequest,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ExecutionError};
