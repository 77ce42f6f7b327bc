//! 请求执行逻辑：解析命令、构建请求、发送并分类响应。
//!
//! Request execution (single attempt, no retries).

use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::CacheKey;
use crate::error::ExecutionError;
use crate::resolver;
use crate::transport::HttpRequest;
use crate::types::{ActionRequest, Credential, ExecutionResult, RequestEcho};
use crate::Result;

use super::classify::classify_execution;
use super::core::Connector;

impl Connector {
    /// Execute one action and report a uniform result.
    ///
    /// Never fails and never panics: every failure, including unknown commands,
    /// malformed configuration and transport errors, is carried by the
    /// returned [`ExecutionResult`]. The request echo is attached whenever the
    /// outbound request got far enough to have a URL.
    pub async fn execute(&self, credential: &Credential, request: &ActionRequest) -> ExecutionResult {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let mut echo = None;

        let result = match self
            .execute_once(credential, request, &request_id, &mut echo)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                debug!(
                    client_request_id = %request_id,
                    error_kind = %err.kind(),
                    "execution failed before a response was classified"
                );
                ExecutionResult::failure(None, ExecutionError::from(err))
            }
        };

        info!(
            client_request_id = %request_id,
            command = request.declared_command().unwrap_or("<missing>"),
            success = result.is_execution_success,
            http_status = result.status_code,
            duration_ms = started.elapsed().as_millis() as u64,
            "execute finished"
        );

        result.with_request(echo)
    }

    async fn execute_once(
        &self,
        credential: &Credential,
        request: &ActionRequest,
        request_id: &str,
        echo: &mut Option<RequestEcho>,
    ) -> Result<ExecutionResult> {
        let command = resolver::resolve(request)?;
        let method = command.http_method();
        let url = command.build_uri(&self.base_url)?;
        *echo = Some(RequestEcho::new(request_id, &method, &url, None));

        let body = command.build_body(&request.config)?;
        *echo = Some(RequestEcho::new(request_id, &method, &url, body.as_ref()));

        debug!(
            client_request_id = %request_id,
            command = %command.kind(),
            url = %url,
            credential = %CacheKey::from_credential(credential).short(),
            "dispatching request"
        );

        let resp = self
            .transport
            .send(HttpRequest {
                method,
                url,
                credential,
                body: body.as_ref(),
                request_id,
            })
            .await?;

        let status = resp.status;
        Ok(match classify_execution(&resp) {
            Ok(json) => ExecutionResult::success(status, json),
            Err(err) => {
                warn!(
                    client_request_id = %request_id,
                    http_status = status,
                    error_kind = %err.kind(),
                    "upstream request failed"
                );
                ExecutionResult::failure(Some(status), ExecutionError::from(err))
            }
        })
    }
}
