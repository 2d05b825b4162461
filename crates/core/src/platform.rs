//! Social-post pages (Twitter / X).
//!
//! Post pages rarely survive generic extraction: the markup is rendered
//! client side and the useful bits live in a couple of card tags. The
//! platform path therefore uses its own rule chain keyed off the author's
//! username, and can synthesize a decent result from the URL alone.

use std::sync::LazyLock;

use url::Url;

use crate::config::MetadataConfig;
use crate::domains::{DomainHint, strip_www};
use crate::extract::{FieldRule, finalize, first_match};
use crate::metadata::MetadataResult;
use crate::text::{bounded_prefix, resolve_url};
use crate::title::title_from_url;

#[cfg(feature = "fetch")]
use crate::fetch::{ProxyGateway, RequestMode};

/// Hostnames served by the social-post platform.
pub const PLATFORM_HOSTS: &[&str] = &["twitter.com", "x.com"];

/// Display name used when no hint supplies one.
pub const PLATFORM_NAME: &str = "Twitter/X";

static TITLE_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::meta("twitter:creator", "twitter:creator"),
        FieldRule::meta("og:title", "og:title"),
    ]
});

static DESCRIPTION_RULES: LazyLock<Vec<FieldRule>> =
    LazyLock::new(|| vec![FieldRule::meta("og:description", "og:description")]);

static THUMBNAIL_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| vec![FieldRule::meta("og:image", "og:image")]);

/// Which extractor a URL is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionPath {
    /// Social-post page; `username` is the first path segment when present.
    Platform { username: Option<String> },
    Generic,
}

impl ExtractionPath {
    pub fn for_url(url: &Url) -> Self {
        match url.host_str() {
            Some(host) if is_platform_host(host) => Self::Platform { username: username_from_path(url) },
            _ => Self::Generic,
        }
    }
}

/// True for a platform host or any of its subdomains.
pub fn is_platform_host(host: &str) -> bool {
    let host = strip_www(host).to_ascii_lowercase();
    PLATFORM_HOSTS
        .iter()
        .any(|p| host == *p || host.strip_suffix(p).is_some_and(|rest| rest.ends_with('.')))
}

/// The post author parsed from `url`, without a leading `@`.
pub fn username_from_url(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(username_from_path)
}

fn username_from_path(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|s| !s.is_empty())
        .map(|s| s.trim_start_matches('@').to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts a post preview from fetched platform HTML.
///
/// Title prefers the creator attribution, then the card title, then
/// `@username on Twitter/X`.
pub fn extract_platform_fields(
    html: &str, page_url: &str, hint: Option<&DomainHint>, username: Option<&str>, config: &MetadataConfig,
) -> MetadataResult {
    let html = bounded_prefix(html, config.html_scan_limit);

    let title = first_match(&TITLE_RULES, html)
        .or_else(|| username.map(|u| format!("@{u} on {PLATFORM_NAME}")))
        .unwrap_or_else(|| title_from_url(page_url, config.title_max_length));

    let description = first_match(&DESCRIPTION_RULES, html)
        .or_else(|| hint.and_then(|h| h.description.clone()))
        .unwrap_or_else(|| "Tweet".to_string());

    let thumbnail = first_match(&THUMBNAIL_RULES, html)
        .map(|src| resolve_url(&src, page_url, &config.placeholder_thumbnail))
        .or_else(|| hint.and_then(|h| h.thumbnail.clone()))
        .unwrap_or_else(|| config.placeholder_thumbnail.clone());

    finalize(&title, &description, &thumbnail, config)
}

/// A post preview built from the username and hint alone.
pub fn synthesize_platform(username: &str, hint: Option<&DomainHint>, config: &MetadataConfig) -> MetadataResult {
    let platform = hint.and_then(|h| h.title.as_deref()).unwrap_or(PLATFORM_NAME);
    let title = format!("@{username} on {platform}");
    let description = hint
        .and_then(|h| h.description.clone())
        .unwrap_or_else(|| format!("Tweet by @{username}"));
    let thumbnail = hint
        .and_then(|h| h.thumbnail.clone())
        .unwrap_or_else(|| config.placeholder_thumbnail.clone());

    finalize(&title, &description, &thumbnail, config)
}

/// Runs the platform path: a no-cors sweep over every relay, then field
/// extraction or synthesis.
///
/// Returns `None` only when nothing was fetched and the username is unknown,
/// leaving the caller to try the generic path.
#[cfg(feature = "fetch")]
pub async fn extract_platform(
    gateway: &ProxyGateway, page_url: &str, hint: Option<&DomainHint>, username: Option<&str>,
    config: &MetadataConfig,
) -> Option<MetadataResult> {
    match gateway.fetch_best_effort(page_url, RequestMode::NoCors).await {
        Some(html) => Some(extract_platform_fields(&html, page_url, hint, username, config)),
        None => {
            let username = username?;
            tracing::info!(url = page_url, username, "no platform content, synthesizing post preview");
            Some(synthesize_platform(username, hint, config))
        }
    }
}
