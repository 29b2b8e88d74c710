//! Composed image references.

use serde::Serialize;

/// Where the tag of an [`ImageReference`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    /// The entry's manually pinned version.
    Pinned,
    /// The caller-supplied default tag.
    Default,
}

/// A full `<registry>/<repository>:<tag>` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    /// Registry prefix without a trailing slash, e.g. `eu.gcr.io/acme/build`.
    pub registry: String,

    /// Repository path, e.g. `ide/code`.
    pub repository: String,

    /// Image tag.
    pub tag: String,

    /// Whether `tag` was pinned or defaulted.
    pub tag_source: TagSource,
}

impl ImageReference {
    pub(crate) fn new(
        registry: &str,
        repository: &str,
        tag: &str,
        tag_source: TagSource,
    ) -> Self {
        Self {
            registry: registry.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            tag: tag.to_string(),
            tag_source,
        }
    }

    /// Returns true if the tag is a pinned version.
    pub fn is_pinned(&self) -> bool {
        self.tag_source == TagSource::Pinned
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.registry.is_empty() {
            write!(f, "{}:{}", self.repository, self.tag)
        } else {
            write!(f, "{}/{}:{}", self.registry, self.repository, self.tag)
        }
    }
}
