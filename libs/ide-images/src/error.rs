//! Error types for IDE image table construction and lookup.

use thiserror::Error;

/// Errors that can occur when building or querying an IDE image table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdeImageError {
    /// No entry exists for the requested identifier.
    #[error("unknown IDE identifier: '{0}'")]
    UnknownIdentifier(String),

    /// The same identifier appears more than once.
    #[error("duplicate IDE identifier: '{0}'")]
    DuplicateIdentifier(String),

    /// Two identifiers point at the same image repository.
    #[error("image repository '{repository}' is used by both '{first}' and '{second}'")]
    DuplicateRepository {
        repository: String,
        first: String,
        second: String,
    },

    /// The identifier is not a valid name.
    #[error("invalid IDE identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
    },

    /// The image repository does not follow the `ide/<name>` convention.
    #[error("invalid image repository '{repository}': {reason}")]
    InvalidRepository {
        repository: String,
        reason: &'static str,
    },

    /// The pinned version is not a usable image tag.
    #[error("invalid pinned version '{version}' for '{identifier}'")]
    InvalidPinnedVersion { identifier: String, version: String },

    /// The default tag supplied for an image reference is not a usable image tag.
    #[error("invalid default tag '{0}'")]
    InvalidTag(String),

    /// The table document could not be parsed.
    #[error("failed to parse IDE image table: {0}")]
    Parse(String),

    /// The table could not be rendered as TOML.
    #[error("failed to render IDE image table: {0}")]
    Serialize(String),

    /// The table file could not be read.
    #[error("failed to read IDE image table from {path}: {message}")]
    Io { path: String, message: String },
}

impl IdeImageError {
    /// Returns true if this error is a lookup miss.
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(self, IdeImageError::UnknownIdentifier(_))
    }

    /// Returns true if this error means the table itself is malformed.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            IdeImageError::DuplicateIdentifier(_)
                | IdeImageError::DuplicateRepository { .. }
                | IdeImageError::InvalidIdentifier { .. }
                | IdeImageError::InvalidRepository { .. }
                | IdeImageError::InvalidPinnedVersion { .. }
        )
    }
}

impl From<toml::de::Error> for IdeImageError {
    fn from(err: toml::de::Error) -> Self {
        IdeImageError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for IdeImageError {
    fn from(err: toml::ser::Error) -> Self {
        IdeImageError::Serialize(err.to_string())
    }
}
