//! Child entry entity
//!
//! A snapshot of the metadata of one directory child, read once when the
//! directory is listed.

use super::file_kind::FileKind;
use std::path::{Path, PathBuf};

/// Content type reported for children whose type cannot be guessed
pub const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of directories
pub const DIRECTORY_CONTENT_TYPE: &str = "inode/directory";

/// Metadata of a single directory child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    /// File name of the child
    name: String,
    /// Absolute path of the child
    path: PathBuf,
    /// Kind of the child, links not followed
    kind: FileKind,
    /// MIME type of the child
    content_type: String,
    /// Modification time in seconds since the epoch (0 when unknown)
    modified: i64,
    /// Whether the child is hidden
    is_hidden: bool,
    /// Whether the child is a backup file
    is_backup: bool,
    /// Link target, only set for symbolic links
    symlink_target: Option<PathBuf>,
}

impl ChildEntry {
    /// Creates a new entry for the child at `path`
    ///
    /// The content type defaults to `application/octet-stream` and the
    /// modification time to 0.
    pub fn new(path: impl Into<PathBuf>, kind: FileKind) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            path,
            kind,
            content_type: UNKNOWN_CONTENT_TYPE.to_string(),
            modified: 0,
            is_hidden: false,
            is_backup: false,
            symlink_target: None,
        }
    }

    /// Sets the content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the modification time
    pub fn with_modified(mut self, modified: Option<i64>) -> Self {
        self.modified = modified.unwrap_or(0);
        self
    }

    /// Sets the hidden flag
    pub fn with_hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    /// Sets the backup flag
    pub fn with_backup(mut self, is_backup: bool) -> Self {
        self.is_backup = is_backup;
        self
    }

    /// Sets the symbolic link target
    pub fn with_symlink_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.symlink_target = Some(target.into());
        self
    }

    /// Returns the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the absolute path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the kind
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Returns the content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the modification time in seconds since the epoch
    pub fn modified(&self) -> i64 {
        self.modified
    }

    /// Returns whether the child is hidden
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns whether the child is a backup file
    pub fn is_backup(&self) -> bool {
        self.is_backup
    }

    /// Returns the symbolic link target, if any
    pub fn symlink_target(&self) -> Option<&Path> {
        self.symlink_target.as_deref()
    }

    /// Returns the path the symbolic link points to, resolved against the
    /// directory containing it
    ///
    /// Absolute targets are returned unchanged.
    pub fn resolved_symlink_target(&self, parent: &Path) -> Option<PathBuf> {
        self.symlink_target.as_ref().map(|target| parent.join(target))
    }
}
