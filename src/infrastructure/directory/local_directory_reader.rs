//! Local directory reader implementation
//!
//! Lists directories on the local filesystem.

use crate::domain::entities::{
    ChildEntry, DIRECTORY_CONTENT_TYPE, FileKind, UNKNOWN_CONTENT_TYPE,
};
use crate::domain::repositories::{ChildEntries, DirectoryReadError, DirectoryReader};
use std::collections::HashSet;
use std::fs::{self, DirEntry, FileType, Metadata};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Content type of empty regular files
const EMPTY_FILE_CONTENT_TYPE: &str = "application/x-zerosize";

/// File listing additional hidden names, one per line
const HIDDEN_LIST_FILE: &str = ".hidden";

/// Local filesystem reader
///
/// Reads child metadata without following symbolic links. A child is hidden
/// when its name starts with a dot or is listed in the directory's
/// `.hidden` file, and is a backup when its name ends with `~`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectoryReader;

impl LocalDirectoryReader {
    /// Creates a new reader
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryReader for LocalDirectoryReader {
    fn read_children(&self, directory: &Path) -> Result<ChildEntries<'_>, DirectoryReadError> {
        let entries = fs::read_dir(directory).map_err(|source| DirectoryReadError::Open {
            path: directory.to_path_buf(),
            source,
        })?;

        let hidden = read_hidden_list(directory);
        let parent = directory.to_path_buf();

        Ok(Box::new(entries.map(move |entry| {
            entry
                .and_then(|entry| child_entry(&entry, &hidden))
                .map_err(|source| DirectoryReadError::Entry {
                    path: parent.clone(),
                    source,
                })
        })))
    }

    fn target_kind(&self, path: &Path) -> FileKind {
        match fs::metadata(path) {
            Ok(metadata) => kind_of(&metadata.file_type()),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Couldn't resolve link target");
                FileKind::Unknown
            }
        }
    }
}

fn read_hidden_list(directory: &Path) -> HashSet<String> {
    fs::read_to_string(directory.join(HIDDEN_LIST_FILE))
        .map(|contents| {
            contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn child_entry(entry: &DirEntry, hidden: &HashSet<String>) -> std::io::Result<ChildEntry> {
    let path = entry.path();
    let metadata = entry.metadata()?;
    let kind = kind_of(&metadata.file_type());
    let name = entry.file_name().to_string_lossy().into_owned();

    let symlink_target = if kind == FileKind::SymbolicLink {
        fs::read_link(&path).ok()
    } else {
        None
    };

    let content_type = content_type(kind, &path, symlink_target.as_deref(), &metadata);

    let mut child = ChildEntry::new(path, kind)
        .with_content_type(content_type)
        .with_modified(modified_secs(&metadata))
        .with_hidden(name.starts_with('.') || hidden.contains(&name))
        .with_backup(name.ends_with('~'));

    if let Some(target) = symlink_target {
        child = child.with_symlink_target(target);
    }

    Ok(child)
}

fn kind_of(file_type: &FileType) -> FileKind {
    if file_type.is_symlink() {
        FileKind::SymbolicLink
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::Regular
    } else if special_content_type(file_type).is_some() {
        FileKind::Special
    } else {
        FileKind::Unknown
    }
}

#[cfg(unix)]
fn special_content_type(file_type: &FileType) -> Option<&'static str> {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_block_device() {
        Some("inode/blockdevice")
    } else if file_type.is_char_device() {
        Some("inode/chardevice")
    } else if file_type.is_fifo() {
        Some("inode/fifo")
    } else if file_type.is_socket() {
        Some("inode/socket")
    } else {
        None
    }
}

#[cfg(not(unix))]
fn special_content_type(_file_type: &FileType) -> Option<&'static str> {
    None
}

fn content_type(
    kind: FileKind,
    path: &Path,
    symlink_target: Option<&Path>,
    metadata: &Metadata,
) -> String {
    let guessed = match kind {
        FileKind::Directory => Some(DIRECTORY_CONTENT_TYPE),
        FileKind::Special => special_content_type(&metadata.file_type()),
        FileKind::Regular if metadata.len() == 0 => Some(EMPTY_FILE_CONTENT_TYPE),
        FileKind::SymbolicLink => symlink_target
            .and_then(|target| mime_guess::from_path(target).first_raw())
            .or_else(|| mime_guess::from_path(path).first_raw()),
        FileKind::Regular | FileKind::Mountable | FileKind::Shortcut | FileKind::Unknown => {
            mime_guess::from_path(path).first_raw()
        }
    };

    guessed.unwrap_or(UNKNOWN_CONTENT_TYPE).to_string()
}

fn modified_secs(metadata: &Metadata) -> Option<i64> {
    let since_epoch = metadata.modified().ok()?.duration_since(UNIX_EPOCH).ok()?;
    i64::try_from(since_epoch.as_secs()).ok()
}
