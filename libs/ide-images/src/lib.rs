//! # wsp-ide-images
//!
//! The IDE image registry table for workspace provisioning.
//!
//! Maps a logical IDE identifier (`code`, `goland`, `xterm`, ...) to the
//! container image repository that runs it, plus an optional pinned
//! version for the few images that are updated by hand instead of
//! following the rolling release tag.
//!
//! ## Design Principles
//!
//! - The table is a value: it is constructed once, validated, and handed to
//!   consumers by reference (or `Arc`). There is no global table.
//! - Lookups are pure, synchronous and in-memory
//! - Construction is the only fallible step besides an unknown identifier
//!
//! ## Example
//!
//! ```
//! use wsp_ide_images::{ids, IdeImageTable};
//!
//! let table = IdeImageTable::builtin();
//!
//! assert_eq!(table.lookup(ids::GOLAND).unwrap().as_str(), "ide/goland");
//! assert!(table.pinned_version(ids::CODE).is_some());
//! assert!(table.pinned_version(ids::GOLAND).is_none());
//! ```

mod builtin;
mod entry;
mod error;
mod reference;
mod table;

pub use builtin::ids;
pub use entry::{IdeImageEntry, ImageRepository, IMAGE_NAMESPACE};
pub use error::IdeImageError;
pub use reference::{ImageReference, TagSource};
pub use table::IdeImageTable;
