//! Thumbnail cache layout
//!
//! Follows the freedesktop.org thumbnail specification: entries are named
//! after the MD5 hash of the source URI and live in one directory per size
//! class, with failure markers under `fail/<application>/`.

use crate::domain::entities::{FileUri, ThumbnailSize};
use md5::{Digest, Md5};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for failure markers written by this program
pub const FAILED_APPLICATION_NAME: &str = "directory-thumbnailer";

const FAILED_DIRECTORY_NAME: &str = "fail";

/// Paths inside a thumbnail cache root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    root: PathBuf,
}

impl CachePaths {
    /// Uses `root` as the cache root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the per-user cache root, `$XDG_CACHE_HOME/thumbnails`
    pub fn default_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("thumbnails"))
    }

    /// Returns the cache root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file name of the entry for `uri`
    pub fn file_name(uri: &FileUri) -> String {
        format!("{}.png", hex::encode(Md5::digest(uri.as_str().as_bytes())))
    }

    /// Returns the path of the cached thumbnail for `uri`
    pub fn entry(&self, size: ThumbnailSize, uri: &FileUri) -> PathBuf {
        self.root
            .join(size.directory_name())
            .join(Self::file_name(uri))
    }

    /// Returns the path of the failure marker this program writes for `uri`
    pub fn failed_entry(&self, uri: &FileUri) -> PathBuf {
        self.root
            .join(FAILED_DIRECTORY_NAME)
            .join(FAILED_APPLICATION_NAME)
            .join(Self::file_name(uri))
    }

    /// Returns the failure markers any application may have written for `uri`
    pub fn failed_entries(&self, uri: &FileUri) -> Vec<PathBuf> {
        let file_name = Self::file_name(uri);
        let Ok(applications) = fs::read_dir(self.root.join(FAILED_DIRECTORY_NAME)) else {
            return Vec::new();
        };

        applications
            .filter_map(Result::ok)
            .map(|application| application.path().join(&file_name))
            .filter(|path| path.is_file())
            .collect()
    }
}
