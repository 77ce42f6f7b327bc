//! 连接器配置：基础地址、超时与代理，支持 YAML 文件与环境变量覆盖。
//!
//! Connector configuration.
//!
//! Values come from (lowest to highest precedence) built-in defaults, an
//! optional YAML file, and environment variables.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            proxy_url: None,
        }
    }
}

impl ConnectorConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| {
            Error::malformed(
                e.to_string(),
                ErrorContext::new().with_source("connector_config"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::malformed(
                format!("failed to read {}: {}", path.display(), e),
                ErrorContext::new().with_source("connector_config"),
            )
        })?;
        Ok(Self::from_yaml_str(&text)?.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| env::var(name).ok())
    }

    /// Applies overrides from `lookup`. Blank or unparseable values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = value("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(v) = parse_override(value("AI_HTTP_TIMEOUT_SECS")) {
            self.timeout_secs = v;
        }
        if let Some(v) = parse_override(value("AI_HTTP_POOL_MAX_IDLE_PER_HOST")) {
            self.pool_max_idle_per_host = v;
        }
        if let Some(v) = parse_override(value("AI_HTTP_POOL_IDLE_TIMEOUT_SECS")) {
            self.pool_idle_timeout_secs = v;
        }
        if let Some(proxy) = value("AI_PROXY_URL") {
            self.proxy_url = Some(proxy);
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL; the trailing slash is dropped so paths can be appended.
    pub fn parsed_base_url(&self) -> Result<url::Url> {
        url::Url::parse(self.base_url.trim_end_matches('/')).map_err(|e| {
            Error::malformed(
                format!("invalid base url '{}': {}", self.base_url, e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("connector_config"),
            )
        })
    }
}

fn parse_override<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
