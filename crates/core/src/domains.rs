//! Domain knowledge table.
//!
//! Maps well-known hostnames to partial metadata. A hint is used twice: as
//! the fallback for any field the page itself does not yield, and as the
//! whole result when no relay returns content.
//!
//! Matching is substring containment of the `www.`-stripped host, checked in
//! table order, so `m.youtube.com` and `gist.github.com` both match.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::{ReadLaterError, Result};

/// Partial metadata known for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainHint {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl DomainHint {
    fn new(title: Option<&str>, description: Option<&str>, thumbnail: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    fn thumbnail_only(thumbnail: &str) -> Self {
        Self::new(None, None, Some(thumbnail))
    }
}

/// Ordered hostname-key → hint table.
#[derive(Debug, Clone)]
pub struct DomainTable {
    entries: Vec<(String, DomainHint)>,
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DomainTable {
    /// The built-in hints for popular sites.
    pub fn builtin() -> Self {
        const YT_THUMB: &str = "https://www.youtube.com/img/desktop/yt_1200.png";
        const TW_THUMB: &str = "https://abs.twimg.com/responsive-web/web/icon-default.77d25fda.png";

        let youtube = DomainHint::new(Some("YouTube"), Some("YouTube - Watch, Listen, Stream"), Some(YT_THUMB));

        let entries = vec![
            ("youtube.com".to_string(), youtube.clone()),
            ("youtu.be".to_string(), youtube),
            (
                "twitter.com".to_string(),
                DomainHint::new(Some("Twitter"), Some("Twitter - What's happening"), Some(TW_THUMB)),
            ),
            (
                "x.com".to_string(),
                DomainHint::new(Some("X (formerly Twitter)"), Some("X - What's happening"), Some(TW_THUMB)),
            ),
            (
                "github.com".to_string(),
                DomainHint::thumbnail_only("https://github.githubassets.com/assets/github-logo-55c5b9a1fe3.png"),
            ),
            (
                "linkedin.com".to_string(),
                DomainHint::thumbnail_only("https://static.licdn.com/sc/h/3m4tgpbdz7gbldapvef2lzjhx"),
            ),
            (
                "postman.com".to_string(),
                DomainHint::thumbnail_only("https://www.postman.com/_ar-assets/images/postman-logo-horizontal-black.svg"),
            ),
            (
                "medium.com".to_string(),
                DomainHint::thumbnail_only("https://miro.medium.com/max/8978/1*s986xIGqhfsN8U--09_AdA.png"),
            ),
            (
                "dev.to".to_string(),
                DomainHint::thumbnail_only(
                    "https://dev-to-uploads.s3.amazonaws.com/uploads/logos/resized_logo_UQww2soKuUsjaOGNB38o.png",
                ),
            ),
            (
                "stackoverflow.com".to_string(),
                DomainHint::thumbnail_only("https://cdn.sstatic.net/Sites/stackoverflow/Img/apple-touch-icon.png"),
            ),
            (
                "npmjs.com".to_string(),
                DomainHint::thumbnail_only("https://www.npmjs.com/static/images/logos/npm-logo.png"),
            ),
        ];

        Self { entries }
    }

    /// Parses a JSON object of `{ "<host-key>": { "title"?, "description"?, "thumbnail"? } }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: BTreeMap<String, DomainHint> =
            serde_json::from_str(json).map_err(|e| ReadLaterError::Config(format!("invalid domain hints: {e}")))?;

        let entries = parsed
            .into_iter()
            .map(|(key, hint)| (key.trim().trim_start_matches("www.").to_lowercase(), hint))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Ok(Self { entries })
    }

    /// Reads hints from a JSON file.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReadLaterError::FileNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Default user hint file (`~/.config/readlater/domains.json`).
    pub fn default_hints_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("readlater").join("domains.json"))
    }

    /// Places `overrides` ahead of the current entries so they win lookups.
    pub fn merge(self, overrides: DomainTable) -> Self {
        let mut entries = overrides.entries;
        entries.extend(self.entries);
        Self { entries }
    }

    /// Finds the first hint whose key is contained in `host`.
    pub fn lookup(&self, host: &str) -> Option<&DomainHint> {
        let host = strip_www(host);
        if host.is_empty() {
            return None;
        }
        let host = host.to_lowercase();
        self.entries.iter().find(|(key, _)| host.contains(key.as_str())).map(|(_, hint)| hint)
    }

    /// Hint for the host of `url`, `None` when the URL does not parse.
    pub fn hint_for_url(&self, url: &str) -> Option<&DomainHint> {
        let parsed = Url::parse(url).ok()?;
        self.lookup(parsed.host_str()?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Removes one leading `www.`.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exact_host() {
        let table = DomainTable::builtin();
        let hint = table.lookup("youtube.com").unwrap();
        assert_eq!(hint.title.as_deref(), Some("YouTube"));
    }

    #[test]
    fn test_www_and_subdomains_match() {
        let table = DomainTable::builtin();
        assert!(table.lookup("www.github.com").is_some());
        assert!(table.lookup("gist.github.com").is_some());
        assert!(table.lookup("m.youtube.com").is_some());
    }

    #[test]
    fn test_unknown_host_misses() {
        let table = DomainTable::builtin();
        assert!(table.lookup("example.org").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_partial_hint() {
        let table = DomainTable::builtin();
        let hint = table.lookup("github.com").unwrap();
        assert!(hint.title.is_none());
        assert!(hint.description.is_none());
        assert!(hint.thumbnail.is_some());
    }

    #[test]
    fn test_hint_for_url() {
        let table = DomainTable::builtin();
        assert!(table.hint_for_url("https://www.npmjs.com/package/serde").is_some());
        assert!(table.hint_for_url("not a url").is_none());
    }

    #[test]
    fn test_from_json_and_merge_precedence() {
        let overrides = DomainTable::from_json(
            r#"{ "www.youtube.com": { "title": "My Tube" }, "example.org": { "description": "Examples" } }"#,
        )
        .unwrap();
        let table = DomainTable::builtin().merge(overrides);

        assert_eq!(table.lookup("youtube.com").unwrap().title.as_deref(), Some("My Tube"));
        assert_eq!(
            table.lookup("docs.example.org").unwrap().description.as_deref(),
            Some("Examples")
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let result = DomainTable::from_json(r#"["youtube.com"]"#);
        assert!(matches!(result, Err(ReadLaterError::Config(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("domains.json");
        std::fs::write(&path, r#"{ "intranet.local": { "title": "Intranet" } }"#).unwrap();

        let table = DomainTable::load_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("wiki.intranet.local").unwrap().title.as_deref(), Some("Intranet"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DomainTable::load_file(Path::new("/nonexistent/domains.json"));
        assert!(matches!(result, Err(ReadLaterError::FileNotFound(_))));
    }
}
