//! File kind entity
//!
//! The type of a directory child as reported by the filesystem, without
//! following symbolic links.

use std::fmt;

/// Kinds of directory children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Regular file
    Regular,
    /// Directory
    Directory,
    /// Symbolic link (never followed when listing)
    SymbolicLink,
    /// Device node, FIFO or socket
    Special,
    /// Location that can be mounted
    Mountable,
    /// Shortcut to another location
    Shortcut,
    /// Anything the filesystem could not classify
    Unknown,
}

impl FileKind {
    /// Returns a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Regular => "regular file",
            FileKind::Directory => "directory",
            FileKind::SymbolicLink => "symbolic link",
            FileKind::Special => "special file",
            FileKind::Mountable => "mountable",
            FileKind::Shortcut => "shortcut",
            FileKind::Unknown => "unknown",
        }
    }

    /// Returns whether this is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, FileKind::Directory)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
