//! The metadata service: cache, hints, platform branch, relays, extraction
//! and fallback synthesis wired into one infallible call.
//!
//! # Example
//!
//! ```rust,no_run
//! use readlater_core::MetadataService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = MetadataService::builder().build()?;
//! let preview = service.extract_metadata("https://www.rust-lang.org/learn").await;
//! println!("{} ({})", preview.title, preview.thumbnail);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::cache::MetadataCache;
use crate::config::MetadataConfig;
use crate::domains::{DomainHint, DomainTable};
use crate::extract::{extract_fields, synthesize_fallback};
use crate::fetch::{ProxyGateway, RequestMode};
use crate::metadata::MetadataResult;
use crate::platform::{ExtractionPath, extract_platform};
use crate::{ReadLaterError, Result};

/// Best-effort metadata extraction with a shared result cache.
///
/// Cheap to share behind an `Arc`; concurrent calls for different URLs are
/// independent, and concurrent misses for the same URL simply both fetch.
#[derive(Debug)]
pub struct MetadataService {
    config: MetadataConfig,
    cache: Arc<MetadataCache>,
    gateway: ProxyGateway,
    domains: DomainTable,
}

impl MetadataService {
    /// Creates a service with its own cache and the built-in domain table.
    pub fn new(config: MetadataConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> MetadataServiceBuilder {
        MetadataServiceBuilder::new()
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }

    pub fn domains(&self) -> &DomainTable {
        &self.domains
    }

    /// Produces a preview for `url`. Never fails: when nothing can be
    /// fetched the result is synthesized from domain hints and the URL.
    pub async fn extract_metadata(&self, url: &str) -> MetadataResult {
        let key = normalize_key(url);

        if let Some(hit) = self.cache.lookup(&key) {
            debug!(url = %key, "metadata cache hit");
            return hit;
        }

        let result = match self.try_extract(url).await {
            Ok(result) => result,
            Err(err) => {
                warn!(url, error = %err, "metadata extraction failed, using fallback");
                self.fallback(url.trim(), self.domains.hint_for_url(url.trim()))
            }
        };

        self.cache.store(&key, result.clone());
        result
    }

    /// Synthesizes a result without page content.
    pub fn fallback(&self, url: &str, hint: Option<&DomainHint>) -> MetadataResult {
        synthesize_fallback(url, hint, &self.config)
    }

    async fn try_extract(&self, url: &str) -> Result<MetadataResult> {
        let parsed = Url::parse(url.trim()).map_err(|e| ReadLaterError::InvalidUrl(format!("{url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ReadLaterError::InvalidUrl(format!("{url}: missing host")))?;
        let hint = self.domains.lookup(host);
        let page_url = parsed.as_str();

        if let ExtractionPath::Platform { username } = ExtractionPath::for_url(&parsed) {
            match extract_platform(&self.gateway, page_url, hint, username.as_deref(), &self.config).await {
                Some(result) => return Ok(result),
                None => info!(url = page_url, "platform extraction found nothing, trying generic path"),
            }
        }

        let result = match self.gateway.fetch_best_effort(page_url, RequestMode::Cors).await {
            Some(html) => extract_fields(&html, page_url, hint, &self.config),
            None => {
                debug!(url = page_url, "no proxy content, synthesizing fallback");
                self.fallback(page_url, hint)
            }
        };

        Ok(result)
    }
}

/// Cache key for `url`: the `url`-crate serialization when it parses,
/// otherwise the trimmed input.
pub fn normalize_key(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => parsed.into(),
        Err(_) => trimmed.to_string(),
    }
}

/// Builder for MetadataService.
///
/// Inject a shared cache to let several services (or tests) see the same
/// entries; omit it to get a fresh one sized from the config.
#[derive(Default)]
pub struct MetadataServiceBuilder {
    config: Option<MetadataConfig>,
    cache: Option<Arc<MetadataCache>>,
    domains: Option<DomainTable>,
}

impl MetadataServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MetadataConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn cache(mut self, cache: Arc<MetadataCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn domains(mut self, domains: DomainTable) -> Self {
        self.domains = Some(domains);
        self
    }

    pub fn build(self) -> Result<MetadataService> {
        let config = self.config.unwrap_or_default();
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MetadataCache::new(config.max_cache_size, config.cache_duration)));
        let gateway = ProxyGateway::new(&config)?;
        let domains = self.domains.unwrap_or_default();

        Ok(MetadataService { config, cache, gateway, domains })
    }
}
