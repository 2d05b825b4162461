use serde::{Deserialize, Serialize};

/// The best-effort preview of a saved link.
///
/// Every field is always populated with something usable: `title` may be
/// synthesized from the URL, `description` may be empty, and `thumbnail` is
/// either an absolute image URL or the placeholder sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataResult {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

impl MetadataResult {
    pub fn new(title: impl Into<String>, description: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), thumbnail: thumbnail.into() }
    }

    /// Whether the thumbnail is the given placeholder rather than a real image.
    pub fn has_placeholder_thumbnail(&self, placeholder: &str) -> bool {
        self.thumbnail == placeholder
    }
}
