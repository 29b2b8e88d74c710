//! IDE image entries and the validated image repository path.

use serde::{Deserialize, Serialize};

use crate::error::IdeImageError;

/// Namespace every IDE image repository lives under.
pub const IMAGE_NAMESPACE: &str = "ide";

/// Maximum length of an image tag.
const MAX_TAG_LEN: usize = 128;

/// An image repository path of the form `ide/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageRepository(pub(crate) String);

impl ImageRepository {
    /// Parses a repository path.
    ///
    /// The path must be exactly two segments: the [`IMAGE_NAMESPACE`] and a
    /// single lowercase path component.
    pub fn parse(s: &str) -> Result<Self, IdeImageError> {
        let invalid = |reason| IdeImageError::InvalidRepository {
            repository: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("repository cannot be empty"));
        }

        let Some((namespace, name)) = s.split_once('/') else {
            return Err(invalid("missing '/' namespace separator"));
        };

        if namespace != IMAGE_NAMESPACE {
            return Err(invalid("namespace must be 'ide'"));
        }

        validate_component(name).map_err(invalid)?;

        Ok(Self(s.to_string()))
    }

    /// Returns the full repository path, e.g. `ide/code`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the image name without the namespace, e.g. `code`.
    pub fn name(&self) -> &str {
        &self.0[IMAGE_NAMESPACE.len() + 1..]
    }
}

impl std::fmt::Display for ImageRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ImageRepository {
    type Err = IdeImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ImageRepository {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ImageRepository {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImageRepository {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// One row of the IDE image table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeImageEntry {
    /// Symbolic IDE name, e.g. `goland`.
    pub identifier: String,

    /// Repository of the image that runs this IDE.
    pub image_repository: ImageRepository,

    /// Manually pinned tag. `None` means the default tag applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<String>,
}

impl IdeImageEntry {
    /// Creates an entry, validating every field.
    pub fn new(
        identifier: impl Into<String>,
        image_repository: &str,
        pinned_version: Option<&str>,
    ) -> Result<Self, IdeImageError> {
        let identifier = identifier.into();

        if let Err(reason) = validate_component(&identifier) {
            return Err(IdeImageError::InvalidIdentifier { identifier, reason });
        }

        let image_repository = ImageRepository::parse(image_repository)?;

        if let Some(version) = pinned_version {
            if !is_valid_tag(version) {
                return Err(IdeImageError::InvalidPinnedVersion {
                    identifier,
                    version: version.to_string(),
                });
            }
        }

        Ok(Self {
            identifier,
            image_repository,
            pinned_version: pinned_version.map(str::to_string),
        })
    }

    /// Returns true if this entry is excluded from automatic version updates.
    pub fn is_pinned(&self) -> bool {
        self.pinned_version.is_some()
    }
}

/// Checks a single lowercase name component (identifier or image name).
pub(crate) fn validate_component(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("name cannot be empty");
    }

    if !s
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.'))
    {
        return Err("only lowercase letters, digits, '-', '_' and '.' are allowed");
    }

    let first = s.as_bytes()[0];
    let last = s.as_bytes()[s.len() - 1];
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err("must start and end with a letter or digit");
    }

    Ok(())
}

/// OCI tag grammar: `[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}`.
pub(crate) fn is_valid_tag(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };

    bytes.len() <= MAX_TAG_LEN
        && (first.is_ascii_alphanumeric() || first == b'_')
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}
