//! Consumer-side helpers applied to a link before it is saved.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::metadata::MetadataResult;
use crate::text::truncate_chars;

/// Per-user quotas and field limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkLimits {
    pub max_links: usize,
    pub max_tags: usize,
    pub max_tag_length: usize,
    pub title_max_length: usize,
    pub description_max_length: usize,
}

impl Default for LinkLimits {
    fn default() -> Self {
        Self { max_links: 30, max_tags: 15, max_tag_length: 15, title_max_length: 100, description_max_length: 250 }
    }
}

impl LinkLimits {
    /// Whether a user holding `count` links may add another.
    pub fn can_add_link(&self, count: usize) -> bool {
        count < self.max_links
    }

    /// Whether a user holding `count` tags may add another.
    pub fn can_add_tag(&self, count: usize) -> bool {
        count < self.max_tags
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag cannot be empty")]
    Empty,

    #[error("Tag must be {max} characters or less")]
    TooLong { max: usize },
}

/// Trims `input` and prepends `https://` unless it already carries an
/// http(s) scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Non-empty, parseable, and http or https.
pub fn validate_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Case-insensitive membership test against already saved URLs.
pub fn is_duplicate<'a>(url: &str, existing: impl IntoIterator<Item = &'a str>) -> bool {
    let url = url.to_lowercase();
    existing.into_iter().any(|e| e.to_lowercase() == url)
}

pub fn validate_tag(tag: &str, limits: &LinkLimits) -> Result<(), TagError> {
    if tag.trim().is_empty() {
        return Err(TagError::Empty);
    }
    if tag.chars().count() > limits.max_tag_length {
        return Err(TagError::TooLong { max: limits.max_tag_length });
    }
    Ok(())
}

/// A link ready to be persisted: normalized URL, bounded metadata and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub tags: Vec<String>,
}

impl LinkDraft {
    /// Builds a draft, truncating title and description to `limits`
    /// independently of any bound the extractor already applied.
    pub fn new(url: &str, metadata: MetadataResult, tags: Vec<String>, limits: &LinkLimits) -> Self {
        Self {
            url: normalize_url(url),
            title: truncate_chars(&metadata.title, limits.title_max_length),
            description: truncate_chars(&metadata.description, limits.description_max_length),
            thumbnail: metadata.thumbnail,
            tags,
        }
    }
}
