//! Tag suggestions derived from a link's hostname and path.

use url::Url;

use crate::domains::strip_www;

/// Upper bound on suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Suggested when nothing in the URL matched.
pub const DEFAULT_TAG: &str = "website";

/// Hostname substring → tags, checked in order.
const HOST_TAGS: &[(&str, &[&str])] = &[
    ("youtube.com", &["video", "youtube"]),
    ("twitter.com", &["twitter", "social"]),
    ("x.com", &["twitter", "social"]),
    ("github.com", &["code", "github"]),
    ("medium.com", &["article", "blog"]),
    ("dev.to", &["coding", "article"]),
    ("linkedin.com", &["professional", "social"]),
    ("instagram.com", &["image", "social"]),
    ("docs.google.com", &["document", "google"]),
    ("careers", &["job", "careers"]),
    ("jobs", &["job", "careers"]),
    ("apply", &["job", "careers"]),
    ("news", &["news", "article"]),
    ("blog", &["blog", "article"]),
    ("stackoverflow.com", &["coding", "tech"]),
    ("facebook.com", &["social", "facebook"]),
    ("tiktok.com", &["video", "social"]),
    ("pinterest.com", &["image", "social"]),
    ("reddit.com", &["social", "forum"]),
    ("dropbox.com", &["document", "storage"]),
    ("drive.google.com", &["document", "google"]),
    ("notion.so", &["document", "notes"]),
    ("trello.com", &["productivity", "tool"]),
    ("slack.com", &["communication", "tool"]),
    ("zoom.us", &["video", "meeting"]),
    ("meet.google.com", &["video", "meeting", "google"]),
    ("amazon.com", &["shopping", "ecommerce"]),
    ("ebay.com", &["shopping", "ecommerce"]),
    ("etsy.com", &["shopping", "handmade"]),
    ("coursera.org", &["education", "course"]),
    ("udemy.com", &["education", "course"]),
    ("wikipedia.org", &["reference", "information"]),
    ("nytimes.com", &["news", "article"]),
    ("cnn.com", &["news", "article"]),
    ("bbc.com", &["news", "article"]),
    ("spotify.com", &["music", "audio"]),
    ("soundcloud.com", &["music", "audio"]),
    ("behance.net", &["design", "portfolio"]),
    ("dribbble.com", &["design", "portfolio"]),
];

/// Lowercased path substring → tags, checked after the host table.
const PATH_TAGS: &[(&str, &[&str])] = &[
    ("careers", &["job", "careers"]),
    ("jobs", &["job", "careers"]),
    ("apply", &["job", "careers"]),
    ("news", &["news", "article"]),
    ("blog", &["blog", "article"]),
    ("article", &["article"]),
    ("video", &["video"]),
    ("photo", &["image"]),
    ("gallery", &["image"]),
    ("docs", &["document"]),
    ("learn", &["education", "tutorial"]),
    ("course", &["education", "tutorial"]),
    ("shop", &["shopping", "ecommerce"]),
    ("store", &["shopping", "ecommerce"]),
    ("product", &["shopping", "ecommerce"]),
];

/// Suggests up to five tags for `url`, skipping any in `existing`.
///
/// Returns `["website"]` when nothing matched (unless the user already has
/// that tag) and an empty list for unparseable input.
///
/// ```rust
/// use readlater_core::suggest_tags;
///
/// assert_eq!(suggest_tags("https://github.com/rust-lang/rust", &[]), vec!["code", "github"]);
/// ```
pub fn suggest_tags(url: &str, existing: &[String]) -> Vec<String> {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return Vec::new();
    };

    let host = strip_www(parsed.host_str().unwrap_or_default()).to_lowercase();
    let path = parsed.path().to_lowercase();
    let mut suggested: Vec<String> = Vec::new();

    let host_matches = HOST_TAGS.iter().filter(|(key, _)| host.contains(key));
    let path_matches = PATH_TAGS.iter().filter(|(key, _)| path.contains(key));

    for (_, tags) in host_matches.chain(path_matches) {
        for tag in *tags {
            if !existing.iter().any(|e| e == tag) && !suggested.iter().any(|s| s == tag) {
                suggested.push((*tag).to_string());
            }
        }
    }

    if suggested.is_empty() && !existing.iter().any(|e| e == DEFAULT_TAG) {
        suggested.push(DEFAULT_TAG.to_string());
    }

    suggested.truncate(MAX_SUGGESTIONS);
    suggested
}
