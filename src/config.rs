//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_retry_limit() -> u32 {
    2
}

fn default_stale_after_ms() -> u64 {
    5 * 60 * 1_000
}

fn default_debounce_ms() -> u64 {
    300
}

#[derive(Clone, Debug, Deserialize)]
/// Client configuration. Only the API origin is required; the tunables
/// default to the production values.
pub struct ApiConfig {
    /// Origin of the CMS REST API, e.g. `http://localhost:8855/api/v1`.
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Extra attempts after a transient list-fetch failure.
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    /// Age after which a cached page is refetched instead of served.
    #[serde(default = "default_stale_after_ms")]
    pub stale_after_ms: u64,
    /// Quiet period before a free-text search edit is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_ms: default_request_timeout_ms(),
            retry_limit: default_retry_limit(),
            stale_after_ms: default_stale_after_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }

    /// Loads configuration from an optional `cms-client` file with `CMS_*`
    /// environment variables taking precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("cms-client").required(false))
            .add_source(config::Environment::with_prefix("CMS"))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
