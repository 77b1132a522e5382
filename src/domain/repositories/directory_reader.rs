//! Directory reader trait
//!
//! Defines the interface for listing the immediate children of a
//! directory.

use crate::domain::entities::{ChildEntry, FileKind};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when listing a directory
#[derive(Error, Debug)]
pub enum DirectoryReadError {
    #[error("Failed to open directory '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read an entry of '{}': {source}", path.display())]
    Entry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Children of a directory, in filesystem order
///
/// Reading may fail part way through, so every item is a `Result`.
pub type ChildEntries<'a> = Box<dyn Iterator<Item = Result<ChildEntry, DirectoryReadError>> + 'a>;

/// Trait for listing directories
pub trait DirectoryReader: Send + Sync {
    /// Lists the immediate children of `directory` without following links
    ///
    /// Entries are produced lazily so that callers can stop early.
    fn read_children(&self, directory: &Path) -> Result<ChildEntries<'_>, DirectoryReadError>;

    /// Returns the kind of whatever `path` points at, following links
    ///
    /// Paths that cannot be resolved report [`FileKind::Unknown`].
    fn target_kind(&self, path: &Path) -> FileKind;
}
