//! The IDE image registry table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builtin::BUILTIN_ENTRIES;
use crate::entry::{is_valid_tag, validate_component, IdeImageEntry, ImageRepository};
use crate::error::IdeImageError;
use crate::reference::{ImageReference, TagSource};

/// Read-only mapping from IDE identifier to image repository and pinned version.
///
/// A table is validated once when it is built and never changes afterwards,
/// so it can be shared freely between threads (`&IdeImageTable` or
/// `Arc<IdeImageTable>`).
///
/// Invariants enforced on construction:
/// - identifiers are unique
/// - image repositories are unique and follow `ide/<name>`
/// - pinned versions are valid image tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeImageTable {
    entries: BTreeMap<String, IdeImageEntry>,
}

/// On-disk TOML layout: a list of `[[ide]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    #[serde(default)]
    ide: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    identifier: String,
    image_repository: String,
    #[serde(default)]
    pinned_version: Option<String>,
}

#[derive(Serialize)]
struct TableDocumentRef<'a> {
    ide: Vec<&'a IdeImageEntry>,
}

impl IdeImageTable {
    /// Builds a table from entries, rejecting anything that breaks an invariant.
    pub fn new(entries: impl IntoIterator<Item = IdeImageEntry>) -> Result<Self, IdeImageError> {
        let mut by_identifier: BTreeMap<String, IdeImageEntry> = BTreeMap::new();
        let mut repository_owners: HashMap<ImageRepository, String> = HashMap::new();

        for entry in entries {
            // Fields are public, so entries may not have gone through `IdeImageEntry::new`.
            if let Err(reason) = validate_component(&entry.identifier) {
                return Err(IdeImageError::InvalidIdentifier {
                    identifier: entry.identifier,
                    reason,
                });
            }

            if let Some(version) = &entry.pinned_version {
                if !is_valid_tag(version) {
                    return Err(IdeImageError::InvalidPinnedVersion {
                        identifier: entry.identifier.clone(),
                        version: version.clone(),
                    });
                }
            }

            if by_identifier.contains_key(&entry.identifier) {
                return Err(IdeImageError::DuplicateIdentifier(entry.identifier));
            }

            if let Some(first) = repository_owners.get(&entry.image_repository) {
                return Err(IdeImageError::DuplicateRepository {
                    repository: entry.image_repository.to_string(),
                    first: first.clone(),
                    second: entry.identifier,
                });
            }

            repository_owners.insert(entry.image_repository.clone(), entry.identifier.clone());
            by_identifier.insert(entry.identifier.clone(), entry);
        }

        debug!(entries = by_identifier.len(), "IDE image table built");

        Ok(Self {
            entries: by_identifier,
        })
    }

    /// Returns the built-in table shipped with this release.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|&(identifier, repository, pinned)| {
                let entry = IdeImageEntry {
                    identifier: identifier.to_string(),
                    image_repository: ImageRepository(repository.to_string()),
                    pinned_version: pinned.map(str::to_string),
                };
                (identifier.to_string(), entry)
            })
            .collect();

        Self { entries }
    }

    /// Parses a table from a TOML document of `[[ide]]` entries.
    pub fn from_toml_str(s: &str) -> Result<Self, IdeImageError> {
        let document: TableDocument = toml::from_str(s)?;

        let entries = document
            .ide
            .into_iter()
            .map(|raw| {
                IdeImageEntry::new(
                    raw.identifier,
                    &raw.image_repository,
                    raw.pinned_version.as_deref(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries)
    }

    /// Loads a table from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IdeImageError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| IdeImageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let table = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            entries = table.len(),
            pinned = table.pinned().count(),
            "Loaded IDE image table"
        );

        Ok(table)
    }

    /// Renders the table in the format accepted by [`IdeImageTable::from_toml_str`].
    pub fn to_toml_string(&self) -> Result<String, IdeImageError> {
        let rendered = toml::to_string(&TableDocumentRef {
            ide: self.entries.values().collect(),
        })?;
        Ok(rendered)
    }

    /// Returns the image repository for an identifier.
    pub fn lookup(&self, identifier: &str) -> Result<&ImageRepository, IdeImageError> {
        self.entry(identifier).map(|entry| &entry.image_repository)
    }

    /// Returns the pinned version for an identifier.
    ///
    /// `None` means the default tag applies. Unknown identifiers also yield
    /// `None`; use [`IdeImageTable::lookup`] to tell the two apart.
    pub fn pinned_version(&self, identifier: &str) -> Option<&str> {
        self.entries
            .get(identifier)
            .and_then(|entry| entry.pinned_version.as_deref())
    }

    /// Returns the full entry for an identifier.
    pub fn entry(&self, identifier: &str) -> Result<&IdeImageEntry, IdeImageError> {
        self.entries.get(identifier).ok_or_else(|| {
            debug!(identifier = %identifier, "Unknown IDE identifier");
            IdeImageError::UnknownIdentifier(identifier.to_string())
        })
    }

    /// Composes `<registry>/<repository>:<tag>` for an identifier.
    ///
    /// The pinned version wins over `default_tag` when the entry has one.
    /// `default_tag` must be a valid image tag even when it ends up unused.
    pub fn image_reference(
        &self,
        identifier: &str,
        registry: &str,
        default_tag: &str,
    ) -> Result<ImageReference, IdeImageError> {
        let entry = self.entry(identifier)?;

        if !is_valid_tag(default_tag) {
            return Err(IdeImageError::InvalidTag(default_tag.to_string()));
        }

        let (tag, source) = match entry.pinned_version.as_deref() {
            Some(pinned) => (pinned, TagSource::Pinned),
            None => (default_tag, TagSource::Default),
        };

        Ok(ImageReference::new(
            registry,
            entry.image_repository.as_str(),
            tag,
            source,
        ))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Iterates over entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &IdeImageEntry> {
        self.entries.values()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries that carry a pinned version.
    pub fn pinned(&self) -> impl Iterator<Item = &IdeImageEntry> {
        self.entries.values().filter(|entry| entry.is_pinned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a IdeImageTable {
    type Item = &'a IdeImageEntry;
    type IntoIter = std::collections::btree_map::Values<'a, String, IdeImageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
