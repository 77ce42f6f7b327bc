//! 模型发现：带凭证级缓存的模型列表查询。
//!
//! Model discovery with a per-credential cache.

use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::CacheKey;
use crate::commands::OpenAiCommand;
use crate::discovery::compatible_models;
use crate::error::ExecutionError;
use crate::resolver;
use crate::transport::HttpRequest;
use crate::types::{Credential, DisplayModel, TriggerRequest};
use crate::Result;

use super::classify::classify_discovery;
use super::core::Connector;

impl Connector {
    /// List the models compatible with the requested trigger kind.
    ///
    /// At most one upstream call per credential per cache lifetime; a
    /// cancelled call leaves the cache untouched.
    pub async fn trigger(
        &self,
        credential: &Credential,
        request: &TriggerRequest,
    ) -> std::result::Result<Vec<DisplayModel>, ExecutionError> {
        let started = Instant::now();
        let result = self.trigger_once(credential, request).await;

        match &result {
            Ok(models) => info!(
                request_type = %request.request_type,
                models = models.len(),
                duration_ms = started.elapsed().as_millis() as u64,
                "trigger finished"
            ),
            Err(err) => info!(
                request_type = %request.request_type,
                error_kind = %err.kind(),
                duration_ms = started.elapsed().as_millis() as u64,
                "trigger failed"
            ),
        }

        result.map_err(ExecutionError::from)
    }

    async fn trigger_once(
        &self,
        credential: &Credential,
        request: &TriggerRequest,
    ) -> Result<Vec<DisplayModel>> {
        let command = resolver::resolve_trigger(request)?;
        let key = CacheKey::from_credential(credential);

        let payload = match self.cache.get(&key) {
            Some(payload) => {
                debug!(cache_hit = true, credential = %key.short(), "model list served from cache");
                payload
            }
            None => {
                debug!(cache_hit = false, credential = %key.short(), "fetching model list");
                let payload = self.fetch_models(&command, credential).await?;
                // Cached before the structure check.
                self.cache.insert(&key, payload)
            }
        };

        compatible_models(&payload, &command)
    }

    async fn fetch_models(&self, command: &dyn OpenAiCommand, credential: &Credential) -> Result<Value> {
        let request_id = Uuid::new_v4().to_string();
        let url = command.build_uri(&self.base_url)?;
        let resp = self
            .transport
            .send(HttpRequest {
                method: command.http_method(),
                url,
                credential,
                body: None,
                request_id: &request_id,
            })
            .await?;

        debug!(
            client_request_id = %request_id,
            http_status = resp.status,
            bytes = resp.body.len(),
            "model list response"
        );
        classify_discovery(&resp)
    }
}
