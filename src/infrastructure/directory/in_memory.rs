//! In-memory directory reader
//!
//! Serves scripted directory listings. Used by tests to control
//! enumeration order, inject read errors and count how far a scan got.

use crate::domain::entities::{ChildEntry, FileKind};
use crate::domain::repositories::{ChildEntries, DirectoryReadError, DirectoryReader};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
struct Listing {
    entries: Vec<ChildEntry>,
    fail_after: Option<usize>,
}

/// Directory reader backed by in-memory listings
#[derive(Debug, Default)]
pub struct InMemoryDirectoryReader {
    listings: HashMap<PathBuf, Listing>,
    targets: HashMap<PathBuf, FileKind>,
    pulled: AtomicUsize,
}

impl InMemoryDirectoryReader {
    /// Creates a reader without any directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory listing its entries in the given order
    pub fn with_directory(mut self, directory: impl Into<PathBuf>, entries: Vec<ChildEntry>) -> Self {
        self.listings.entry(directory.into()).or_default().entries = entries;
        self
    }

    /// Makes reading `directory` fail after `count` entries
    pub fn with_failure_after(mut self, directory: impl Into<PathBuf>, count: usize) -> Self {
        self.listings.entry(directory.into()).or_default().fail_after = Some(count);
        self
    }

    /// Sets what a symbolic link target resolves to
    pub fn with_target(mut self, path: impl Into<PathBuf>, kind: FileKind) -> Self {
        self.targets.insert(path.into(), kind);
        self
    }

    /// Returns how many items (entries and errors) have been handed out
    pub fn entries_pulled(&self) -> usize {
        self.pulled.load(Ordering::Relaxed)
    }
}

impl DirectoryReader for InMemoryDirectoryReader {
    fn read_children(&self, directory: &Path) -> Result<ChildEntries<'_>, DirectoryReadError> {
        let listing = self
            .listings
            .get(directory)
            .ok_or_else(|| DirectoryReadError::Open {
                path: directory.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;

        let injected = listing.fail_after.map(|_| {
            Err(DirectoryReadError::Entry {
                path: directory.to_path_buf(),
                source: io::Error::other("injected read failure"),
            })
        });

        let entries = listing
            .entries
            .iter()
            .cloned()
            .map(Ok)
            .take(listing.fail_after.unwrap_or(usize::MAX))
            .chain(injected)
            .inspect(|_| {
                self.pulled.fetch_add(1, Ordering::Relaxed);
            });

        Ok(Box::new(entries))
    }

    fn target_kind(&self, path: &Path) -> FileKind {
        self.targets.get(path).copied().unwrap_or(FileKind::Unknown)
    }
}
