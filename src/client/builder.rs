use std::sync::Arc;

use crate::cache::DiscoveryCache;
use crate::client::core::Connector;
use crate::config::ConnectorConfig;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};

/// Builder for creating connectors with custom configuration.
#[derive(Default)]
pub struct ConnectorBuilder {
    config: Option<ConnectorConfig>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<DiscoveryCache>>,
}

impl ConnectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of defaults plus environment.
    pub fn config(mut self, config: ConnectorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the base URL of the configuration.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Inject a transport. Timeouts and proxy settings of the configuration
    /// only apply to the default [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a private discovery cache instead of the process-wide one.
    pub fn discovery_cache(mut self, cache: Arc<DiscoveryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<Connector> {
        let mut config = self.config.unwrap_or_else(ConnectorConfig::from_env);
        if let Some(base_url) = self.base_url_override {
            config = config.with_base_url(base_url);
        }

        let base_url = config.parsed_base_url()?;

        let transport = match self.transport {
            Some(t) => t,
            None => {
                let http = HttpTransport::new(&config).map_err(|e| {
                    Error::malformed(
                        format!("failed to build HTTP client: {}", e),
                        ErrorContext::new()
                            .with_field_path("proxy_url")
                            .with_source("connector_builder"),
                    )
                })?;
                Arc::new(http) as Arc<dyn Transport>
            }
        };

        let cache = self.cache.unwrap_or_else(DiscoveryCache::global);

        tracing::debug!(
            base_url = %base_url,
            ttl_secs = cache.ttl().as_secs(),
            "connector built"
        );

        Ok(Connector {
            config,
            base_url,
            transport,
            cache,
        })
    }
}
