//! 凭证校验与连通性测试。
//!
//! Credential validation and connection testing.

use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::commands::{CommandKind, ModelListCommand, OpenAiCommand};
use crate::error::ExecutionError;
use crate::error_code::ErrorKind;
use crate::transport::HttpRequest;
use crate::types::Credential;

use super::core::Connector;

pub const MISSING_CREDENTIAL: &str = "Bearer token is required";
pub const BLANK_CREDENTIAL: &str = "Bearer token must not be blank";

/// Static checks on a credential. An empty set means the credential is
/// structurally valid; it says nothing about whether the server accepts it.
pub fn validate_credential(credential: Option<&Credential>) -> BTreeSet<String> {
    let mut errors = BTreeSet::new();
    match credential {
        None => {
            errors.insert(MISSING_CREDENTIAL.to_string());
        }
        Some(c) if c.is_blank() => {
            errors.insert(BLANK_CREDENTIAL.to_string());
        }
        Some(_) => {}
    }
    errors
}

impl Connector {
    /// See [`validate_credential`].
    pub fn validate_credential(&self, credential: Option<&Credential>) -> BTreeSet<String> {
        validate_credential(credential)
    }

    /// Calls the model-list endpoint with the credential.
    ///
    /// Bypasses the discovery cache. Any failure, including transport errors,
    /// is reported as an authentication error.
    pub async fn test_connection(&self, credential: &Credential) -> Result<(), ExecutionError> {
        if credential.is_blank() {
            return Err(ExecutionError::new(ErrorKind::Authentication, BLANK_CREDENTIAL));
        }

        let request_id = Uuid::new_v4().to_string();
        let command = ModelListCommand::for_target(CommandKind::Chat);
        let url = command.build_uri(&self.base_url).map_err(|e| {
            ExecutionError::new(ErrorKind::Authentication, e.to_string())
        })?;

        let outcome = self
            .transport
            .send(HttpRequest {
                method: command.http_method(),
                url,
                credential,
                body: None,
                request_id: &request_id,
            })
            .await;

        match outcome {
            Ok(resp) if resp.is_success() => {
                info!(client_request_id = %request_id, http_status = resp.status, "connection ok");
                Ok(())
            }
            Ok(resp) => {
                debug!(client_request_id = %request_id, http_status = resp.status, "connection rejected");
                let err = ExecutionError::new(
                    ErrorKind::Authentication,
                    format!("Connection test failed: HTTP {}", resp.status),
                );
                let text = resp.text();
                Err(if text.is_empty() {
                    err
                } else {
                    err.with_detail(serde_json::Value::String(text))
                })
            }
            Err(e) => {
                debug!(client_request_id = %request_id, error = %e, "connection test transport failure");
                Err(ExecutionError::new(
                    ErrorKind::Authentication,
                    format!("Connection test failed: {}", e),
                ))
            }
        }
    }
}
