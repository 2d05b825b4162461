//! Small string helpers shared by the extractors.
//!
//! Lengths are counted in `char`s throughout; slicing never splits a code
//! point.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&nbsp;|&amp;|&#39;|&#039;|&#x27;|&quot;").expect("valid regex"));

/// Decodes the handful of entities pages commonly leave in meta content,
/// collapses whitespace runs to one space and trims.
///
/// Decoding is a single pass, so `&amp;quot;` becomes `&quot;`, not `"`.
pub fn clean_text(text: &str) -> String {
    let decoded = ENTITY_RE.replace_all(text, |caps: &regex::Captures| match &caps[0] {
        "&nbsp;" => " ",
        "&amp;" => "&",
        "&quot;" => "\"",
        _ => "'",
    });

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// The first `limit` characters of `html`; content past this point is never scanned.
pub fn bounded_prefix(html: &str, limit: usize) -> &str {
    match html.char_indices().nth(limit) {
        Some((idx, _)) => &html[..idx],
        None => html,
    }
}

/// Resolves an image source against the page it was found on.
///
/// Absolute `http(s)` sources are returned untouched; anything that cannot
/// be joined onto `base` yields `placeholder`.
pub fn resolve_url(src: &str, base: &str, placeholder: &str) -> String {
    let src = src.trim();
    if src.is_empty() {
        return placeholder.to_string();
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return src.to_string();
    }

    Url::parse(base)
        .and_then(|base| base.join(src))
        .map(String::from)
        .unwrap_or_else(|_| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    #[case("It&#39;s here", "It's here")]
    #[case("&quot;quoted&quot;", "\"quoted\"")]
    #[case("a&nbsp;&nbsp;b", "a b")]
    #[case("  lots \n\t of   space  ", "lots of space")]
    #[case("&amp;quot;", "&quot;")]
    #[case("", "")]
    fn test_clean_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_text(input), expected);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_bounded_prefix() {
        let html = "ééééé";
        assert_eq!(bounded_prefix(html, 2), "éé");
        assert_eq!(bounded_prefix(html, 50), html);
    }

    #[rstest]
    #[case("/img/a.png", "https://example.com/posts/1", "https://example.com/img/a.png")]
    #[case("img/a.png", "https://example.com/posts/1", "https://example.com/posts/img/a.png")]
    #[case("//cdn.example.com/a.png", "https://example.com/", "https://cdn.example.com/a.png")]
    #[case("https://cdn.example.com/a.png", "https://example.com/", "https://cdn.example.com/a.png")]
    #[case("/img/a.png", "not a base", "/placeholder.svg")]
    #[case("   ", "https://example.com/", "/placeholder.svg")]
    fn test_resolve_url(#[case] src: &str, #[case] base: &str, #[case] expected: &str) {
        assert_eq!(resolve_url(src, base, "/placeholder.svg"), expected);
    }
}
