//! Tunables for the metadata pipeline.
//!
//! All values are plain constants with sensible defaults; nothing here reads
//! the environment. Front ends map their own flags onto
//! [`MetadataConfigBuilder`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use readlater_core::MetadataConfig;
//!
//! let config = MetadataConfig::builder()
//!     .fetch_timeout(Duration::from_millis(1500))
//!     .max_cache_size(500)
//!     .build();
//! assert_eq!(config.max_cache_size, 500);
//! assert_eq!(config.title_max_length, 100);
//! ```

use std::time::Duration;

use crate::proxy::{ProxyStrategy, default_strategies};

/// Sentinel thumbnail used when no image could be found.
pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.svg";

/// Desktop browser User-Agent presented to relays.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for [`MetadataService`](crate::MetadataService) and its parts.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// How long a cached result stays fresh (default: 1 hour).
    pub cache_duration: Duration,

    /// Maximum number of cached URLs (default: 100).
    pub max_cache_size: usize,

    /// Per-attempt proxy timeout (default: 2.5 s).
    pub fetch_timeout: Duration,

    /// Maximum title length in characters (default: 100).
    pub title_max_length: usize,

    /// Maximum description length in characters (default: 250).
    pub description_max_length: usize,

    /// Number of leading HTML characters scanned by the rule chains (default: 50 000).
    pub html_scan_limit: usize,

    /// Thumbnail used when nothing better is known.
    pub placeholder_thumbnail: String,

    /// User-Agent sent in [`RequestMode::Cors`](crate::RequestMode::Cors) requests.
    pub user_agent: String,

    /// Relays, tried in this order.
    pub proxies: Vec<ProxyStrategy>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            cache_duration: Duration::from_secs(60 * 60),
            max_cache_size: 100,
            fetch_timeout: Duration::from_millis(2500),
            title_max_length: 100,
            description_max_length: 250,
            html_scan_limit: 50_000,
            placeholder_thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxies: default_strategies(),
        }
    }
}

impl MetadataConfig {
    /// Creates a new builder for MetadataConfig.
    pub fn builder() -> MetadataConfigBuilder {
        MetadataConfigBuilder::new()
    }
}

/// Builder for MetadataConfig.
pub struct MetadataConfigBuilder {
    config: MetadataConfig,
}

impl MetadataConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: MetadataConfig::default() }
    }

    /// Sets the cache freshness window.
    pub fn cache_duration(mut self, value: Duration) -> Self {
        self.config.cache_duration = value;
        self
    }

    /// Sets the cache capacity.
    pub fn max_cache_size(mut self, value: usize) -> Self {
        self.config.max_cache_size = value;
        self
    }

    /// Sets the per-attempt fetch timeout.
    pub fn fetch_timeout(mut self, value: Duration) -> Self {
        self.config.fetch_timeout = value;
        self
    }

    /// Sets the title length limit.
    pub fn title_max_length(mut self, value: usize) -> Self {
        self.config.title_max_length = value;
        self
    }

    /// Sets the description length limit.
    pub fn description_max_length(mut self, value: usize) -> Self {
        self.config.description_max_length = value;
        self
    }

    /// Sets how many leading HTML characters are scanned.
    pub fn html_scan_limit(mut self, value: usize) -> Self {
        self.config.html_scan_limit = value;
        self
    }

    /// Sets the placeholder thumbnail.
    pub fn placeholder_thumbnail(mut self, value: impl Into<String>) -> Self {
        self.config.placeholder_thumbnail = value.into();
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Replaces the relay list.
    pub fn proxies(mut self, value: Vec<ProxyStrategy>) -> Self {
        self.config.proxies = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> MetadataConfig {
        self.config
    }
}

impl Default for MetadataConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetadataConfig::default();
        assert_eq!(config.cache_duration, Duration::from_secs(3600));
        assert_eq!(config.max_cache_size, 100);
        assert_eq!(config.fetch_timeout, Duration::from_millis(2500));
        assert_eq!(config.title_max_length, 100);
        assert_eq!(config.description_max_length, 250);
        assert_eq!(config.html_scan_limit, 50_000);
        assert_eq!(config.placeholder_thumbnail, "/placeholder.svg");
        assert_eq!(config.proxies.len(), 6);
    }

    #[test]
    fn test_builder_overrides() {
        let config = MetadataConfig::builder()
            .title_max_length(20)
            .description_max_length(40)
            .placeholder_thumbnail("/none.png")
            .proxies(Vec::new())
            .build();
        assert_eq!(config.title_max_length, 20);
        assert_eq!(config.description_max_length, 40);
        assert_eq!(config.placeholder_thumbnail, "/none.png");
        assert!(config.proxies.is_empty());
        assert_eq!(config.max_cache_size, 100);
    }
}
