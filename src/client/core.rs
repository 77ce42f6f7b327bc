use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::cache::DiscoveryCache;
use crate::config::ConnectorConfig;
use crate::transport::Transport;
use crate::Result;

use super::builder::ConnectorBuilder;

/// OpenAI connector bound to one base URL, transport and discovery cache.
///
/// A connector is immutable after construction and safe to share between
/// tasks. Every public entry point is infallible from the caller's point of
/// view: failures come back as [`crate::ExecutionError`] values, never as
/// panics or internal error types.
#[derive(Clone)]
pub struct Connector {
    pub(crate) config: ConnectorConfig,
    pub(crate) base_url: Url,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) cache: Arc<DiscoveryCache>,
}

impl Connector {
    /// Connector with defaults and environment overrides, sharing the
    /// process-wide discovery cache.
    pub fn new() -> Result<Self> {
        ConnectorBuilder::new().build()
    }

    pub fn builder() -> ConnectorBuilder {
        ConnectorBuilder::new()
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<DiscoveryCache> {
        &self.cache
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("base_url", &self.base_url.as_str())
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
