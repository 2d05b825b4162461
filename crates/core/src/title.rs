//! Titles synthesized from URL structure.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domains::strip_www;
use crate::platform::{PLATFORM_NAME, is_platform_host};
use crate::text::truncate_chars;

static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\w+$").expect("valid regex"));

/// Builds a human-readable title from `url` alone.
///
/// * social-post hosts → `@{first path segment} on Twitter/X`
/// * otherwise the last path segment, extension stripped, `-`/`_` turned
///   into spaces and every word capitalized
/// * no usable segment → the host without `www.`
/// * unparseable input → the input itself
///
/// The result never exceeds `max_len` characters.
///
/// ```rust
/// use readlater_core::title_from_url;
///
/// assert_eq!(title_from_url("https://example.com/my-cool_article.html", 100), "My Cool Article");
/// assert_eq!(title_from_url("https://www.example.com/", 100), "example.com");
/// ```
pub fn title_from_url(url: &str, max_len: usize) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return truncate_chars(url, max_len);
    };

    let host = parsed.host_str().unwrap_or_default();
    let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();

    if is_platform_host(host)
        && let Some(user) = segments.first()
    {
        return truncate_chars(&format!("@{} on {PLATFORM_NAME}", user.trim_start_matches('@')), max_len);
    }

    if let Some(last) = segments.last() {
        let title = words_from_segment(last);
        if !title.is_empty() {
            return truncate_chars(&title, max_len);
        }
    }

    if host.is_empty() {
        return truncate_chars(url, max_len);
    }

    truncate_chars(strip_www(host), max_len)
}

fn words_from_segment(segment: &str) -> String {
    let stem = EXTENSION_RE.replace(segment, "");
    stem.replace(['-', '_'], " ").split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
