//! Field extraction from raw HTML.
//!
//! Each field has its own ordered rule chain, evaluated top to bottom over
//! the same bounded HTML prefix; the first rule yielding non-empty text
//! wins. Rules are plain data so the precedence is visible in one place and
//! every rule can be tested on its own.
//!
//! | field | chain |
//! |---|---|
//! | title | `og:title` → `twitter:title` → `<title>` → first `<h1>` |
//! | description | `og:description` → `twitter:description` → `meta description` → first `<p>` of 20+ chars |
//! | thumbnail | `og:image` → `twitter:image` → first `<img src>` |
//!
//! Anything left unresolved falls back to the domain hint, then to a
//! synthesized value. Truncation happens once, in [`finalize`].

use std::sync::LazyLock;

use regex::Regex;

use crate::config::MetadataConfig;
use crate::domains::DomainHint;
use crate::metadata::MetadataResult;
use crate::text::{bounded_prefix, clean_text, resolve_url, truncate_chars};
use crate::title::title_from_url;

/// A double- or single-quoted attribute value, captured in group 1 or 2.
const QUOTED_VALUE: &str = r#"(?:"([^"]*)"|'([^']*)')"#;

/// One named extraction rule. Holds one or more patterns; the first
/// capture group that participates in a match is the candidate value.
#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    patterns: Vec<Regex>,
}

impl FieldRule {
    /// Matches `<meta property|name="{key}" content="…">` in either attribute order.
    pub fn meta(name: &'static str, key: &str) -> Self {
        let key = regex::escape(key);
        let forward = format!(
            r#"(?i)<meta\s(?:[^>]*?\s)?(?:property|name)\s*=\s*["']{key}["'](?:[^>]*?\s)?content\s*=\s*{QUOTED_VALUE}"#
        );
        let reverse = format!(
            r#"(?i)<meta\s(?:[^>]*?\s)?content\s*=\s*{QUOTED_VALUE}(?:[^>]*?\s)?(?:property|name)\s*=\s*["']{key}["']"#
        );
        Self { name, patterns: vec![compile(&forward), compile(&reverse)] }
    }

    /// A rule backed by a single pattern.
    pub fn pattern(name: &'static str, pattern: &str) -> Self {
        Self { name, patterns: vec![compile(pattern)] }
    }

    /// The cleaned value of the first match, `None` when nothing matches or
    /// the match cleans down to an empty string.
    pub fn apply(&self, html: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            let caps = re.captures(html)?;
            let raw = caps.iter().skip(1).flatten().next()?;
            let cleaned = clean_text(raw.as_str());
            if cleaned.is_empty() { None } else { Some(cleaned) }
        })
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

pub static TITLE_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::meta("og:title", "og:title"),
        FieldRule::meta("twitter:title", "twitter:title"),
        FieldRule::pattern("title", r"(?i)<title(?:\s[^>]*)?>([^<]*)</title>"),
        FieldRule::pattern("h1", r"(?i)<h1(?:\s[^>]*)?>([^<]+)</h1>"),
    ]
});

pub static DESCRIPTION_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::meta("og:description", "og:description"),
        FieldRule::meta("twitter:description", "twitter:description"),
        FieldRule::meta("description", "description"),
        FieldRule::pattern("paragraph", r"(?i)<p(?:\s[^>]*)?>([^<]{20,})</p>"),
    ]
});

pub static THUMBNAIL_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::meta("og:image", "og:image"),
        FieldRule::meta("twitter:image", "twitter:image"),
        FieldRule::pattern("img", &format!(r"(?i)<img\s(?:[^>]*?\s)?src\s*=\s*{QUOTED_VALUE}")),
    ]
});

/// Evaluates `rules` in order and returns the first non-empty value.
pub fn first_match(rules: &[FieldRule], html: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(html))
}

/// Runs the three generic rule chains over `html` fetched from `page_url`.
pub fn extract_fields(
    html: &str, page_url: &str, hint: Option<&DomainHint>, config: &MetadataConfig,
) -> MetadataResult {
    let html = bounded_prefix(html, config.html_scan_limit);

    let title = first_match(&TITLE_RULES, html)
        .or_else(|| hint.and_then(|h| h.title.clone()))
        .unwrap_or_else(|| title_from_url(page_url, config.title_max_length));

    let description = first_match(&DESCRIPTION_RULES, html)
        .or_else(|| hint.and_then(|h| h.description.clone()))
        .unwrap_or_default();

    let thumbnail = first_match(&THUMBNAIL_RULES, html)
        .map(|src| resolve_url(&src, page_url, &config.placeholder_thumbnail))
        .or_else(|| hint.and_then(|h| h.thumbnail.clone()))
        .unwrap_or_else(|| config.placeholder_thumbnail.clone());

    finalize(&title, &description, &thumbnail, config)
}

/// The result used when no page content is available at all.
pub fn synthesize_fallback(url: &str, hint: Option<&DomainHint>, config: &MetadataConfig) -> MetadataResult {
    let title = hint
        .and_then(|h| h.title.clone())
        .unwrap_or_else(|| title_from_url(url, config.title_max_length));
    let description = hint.and_then(|h| h.description.clone()).unwrap_or_default();
    let thumbnail = hint
        .and_then(|h| h.thumbnail.clone())
        .unwrap_or_else(|| config.placeholder_thumbnail.clone());

    finalize(&title, &description, &thumbnail, config)
}

/// Sanitizes and truncates the final field values. The only place length
/// limits are applied.
pub(crate) fn finalize(title: &str, description: &str, thumbnail: &str, config: &MetadataConfig) -> MetadataResult {
    let thumbnail = thumbnail.trim();
    MetadataResult {
        title: truncate_chars(&clean_text(title), config.title_max_length),
        description: truncate_chars(&clean_text(description), config.description_max_length),
        thumbnail: if thumbnail.is_empty() { config.placeholder_thumbnail.clone() } else { thumbnail.to_string() },
    }
}
