pub mod cache;
pub mod config;
pub mod domains;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod link;
pub mod metadata;
pub mod platform;
pub mod proxy;
#[cfg(feature = "fetch")]
pub mod service;
pub mod tags;
pub mod text;
pub mod title;

pub use cache::MetadataCache;
pub use config::{DEFAULT_USER_AGENT, MetadataConfig, MetadataConfigBuilder, PLACEHOLDER_THUMBNAIL};
pub use domains::{DomainHint, DomainTable};
pub use error::{ReadLaterError, Result};
pub use extract::{extract_fields, synthesize_fallback};
#[cfg(feature = "fetch")]
pub use fetch::{ProxyGateway, RequestMode, fetch_file, fetch_stdin, unwrap_envelope};
pub use link::{LinkDraft, LinkLimits, TagError, is_duplicate, normalize_url, validate_tag, validate_url};
pub use metadata::MetadataResult;
pub use platform::{ExtractionPath, extract_platform_fields, is_platform_host, synthesize_platform, username_from_url};
pub use proxy::{ProxyStrategy, default_strategies};
#[cfg(feature = "fetch")]
pub use service::{MetadataService, MetadataServiceBuilder, normalize_key};
pub use tags::suggest_tags;
pub use title::title_from_url;
