//! Content fetching through CORS relays, files, and stdin.
//!
//! [`ProxyGateway`] walks the configured [`ProxyStrategy`] list in order and
//! returns the first non-empty page body. Every per-attempt failure is
//! logged and swallowed; running out of relays is a normal "no content"
//! outcome, not an error.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::{debug, warn};

use crate::config::MetadataConfig;
use crate::proxy::ProxyStrategy;
use crate::{ReadLaterError, Result};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// How a relay request is shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMode {
    /// Full header profile, including a browser User-Agent.
    #[default]
    Cors,
    /// Only CORS-safelisted headers (`Accept`, `Accept-Language`). Relays
    /// that fingerprint the User-Agent sometimes answer these differently.
    NoCors,
}

/// Sequential, first-success fetcher over a relay list.
#[derive(Debug, Clone)]
pub struct ProxyGateway {
    client: Client,
    strategies: Vec<ProxyStrategy>,
    timeout: Duration,
    user_agent: String,
}

impl ProxyGateway {
    /// Builds a gateway from the relay list and timeout in `config`.
    ///
    /// The client keeps no cookie store, so credentials are never sent, and
    /// follows up to ten redirects.
    pub fn new(config: &MetadataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(ReadLaterError::HttpError)?;

        Ok(Self {
            client,
            strategies: config.proxies.clone(),
            timeout: config.fetch_timeout,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn strategies(&self) -> &[ProxyStrategy] {
        &self.strategies
    }

    /// Tries every relay in order; returns the first non-empty body.
    pub async fn fetch_best_effort(&self, target: &str, mode: RequestMode) -> Option<String> {
        for strategy in &self.strategies {
            match self.fetch_via(strategy, target, mode).await {
                Ok(Some(html)) => {
                    debug!(proxy = %strategy.name, url = target, bytes = html.len(), ?mode, "proxy returned content");
                    return Some(html);
                }
                Ok(None) => debug!(proxy = %strategy.name, url = target, ?mode, "proxy returned no content"),
                Err(err) => warn!(proxy = %strategy.name, url = target, ?mode, error = %err, "proxy failed, trying next"),
            }
        }

        debug!(url = target, ?mode, attempts = self.strategies.len(), "all proxies exhausted");
        None
    }

    /// One attempt against one relay, bounded by the gateway timeout.
    ///
    /// `Ok(None)` means the relay answered successfully but with nothing
    /// usable (empty body, envelope without `contents`).
    pub async fn fetch_via(&self, strategy: &ProxyStrategy, target: &str, mode: RequestMode) -> Result<Option<String>> {
        let proxy_url = strategy.build_url(target);
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        match tokio::time::timeout(self.timeout, self.request(&proxy_url, mode, timeout_ms)).await {
            Ok(result) => result,
            Err(_) => Err(ReadLaterError::Timeout { timeout_ms }),
        }
    }

    async fn request(&self, proxy_url: &str, mode: RequestMode, timeout_ms: u64) -> Result<Option<String>> {
        let mut request = self
            .client
            .get(proxy_url)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE);

        if mode == RequestMode::Cors {
            request = request.header(USER_AGENT, &self.user_agent);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() { ReadLaterError::Timeout { timeout_ms } } else { ReadLaterError::HttpError(e) }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReadLaterError::HttpStatus { status: status.as_u16() });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

        let body = response.text().await?;
        let content = if is_json { unwrap_envelope(&body)? } else { body };

        Ok(if content.trim().is_empty() { None } else { Some(content) })
    }
}

/// Pulls the page out of a JSON relay envelope (`{"contents": "<html>…"}`).
///
/// A missing, null or non-string `contents` is treated as no content.
pub fn unwrap_envelope(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    Ok(value.get("contents").and_then(serde_json::Value::as_str).unwrap_or_default().to_string())
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ReadLaterError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(ReadLaterError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(ReadLaterError::from)?;

    Ok(buffer)
}
