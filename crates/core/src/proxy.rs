//! Proxy strategy list.
//!
//! A strategy is nothing but a URL template fronting the target page. The
//! gateway owns the single fetch primitive; strategies stay plain data so the
//! list can be reordered, extended from the command line, or pointed at a
//! mock server in tests.

use url::Url;
use url::form_urlencoded;

use crate::{ReadLaterError, Result};

/// Placeholder replaced by the encoded target URL.
pub const TARGET_PLACEHOLDER: &str = "{url}";

/// A relay endpoint that fetches the target URL on our behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyStrategy {
    /// Short label used in logs.
    pub name: String,
    /// Endpoint template containing `{url}`.
    pub template: String,
}

impl ProxyStrategy {
    /// Creates a named strategy, rejecting templates without `{url}`.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(TARGET_PLACEHOLDER) {
            return Err(ReadLaterError::Config(format!(
                "proxy template `{template}` must contain {TARGET_PLACEHOLDER}"
            )));
        }
        Ok(Self { name: name.into(), template })
    }

    /// Creates a strategy named after the template's host.
    pub fn from_template(template: &str) -> Result<Self> {
        let name = Url::parse(&template.replace(TARGET_PLACEHOLDER, ""))
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "custom".to_string());
        Self::new(name, template)
    }

    /// Builds the relay URL for `target`.
    pub fn build_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.template.replace(TARGET_PLACEHOLDER, &encoded)
    }
}

/// The built-in relays, most reliable first.
///
/// cors-anywhere stays last because it is heavily rate limited.
pub fn default_strategies() -> Vec<ProxyStrategy> {
    [
        ("allorigins", "https://api.allorigins.win/raw?url={url}"),
        ("corsproxy", "https://corsproxy.io/?{url}"),
        ("codetabs", "https://api.codetabs.com/v1/proxy?quest={url}"),
        ("cors.sh", "https://cors.sh/{url}"),
        ("thingproxy", "https://thingproxy.freeboard.io/fetch/{url}"),
        ("cors-anywhere", "https://cors-anywhere.herokuapp.com/{url}"),
    ]
    .into_iter()
    .map(|(name, template)| ProxyStrategy { name: name.to_string(), template: template.to_string() })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_target() {
        let strategy = ProxyStrategy::new("allorigins", "https://api.allorigins.win/raw?url={url}").unwrap();
        let built = strategy.build_url("https://example.com/a?b=c&d=e");
        assert_eq!(
            built,
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc%26d%3De"
        );
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let result = ProxyStrategy::new("broken", "https://proxy.example/fetch");
        assert!(matches!(result, Err(ReadLaterError::Config(_))));
    }

    #[test]
    fn test_from_template_names_by_host() {
        let strategy = ProxyStrategy::from_template("http://127.0.0.1:8080/raw?url={url}").unwrap();
        assert_eq!(strategy.name, "127.0.0.1");
    }

    #[test]
    fn test_default_order() {
        let names: Vec<_> = default_strategies().into_iter().map(|s| s.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("allorigins"));
        assert_eq!(names.last().map(String::as_str), Some("cors-anywhere"));
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_default_templates_are_valid() {
        for strategy in default_strategies() {
            assert!(ProxyStrategy::new(strategy.name.clone(), strategy.template.clone()).is_ok());
        }
    }
}
