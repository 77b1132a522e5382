//! File URI value object
//!
//! Thumbnail caches key their entries by the `file://` URI of the
//! thumbnailed file, so every capability query goes through this type.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors that can occur when converting between paths and URIs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileUriError {
    #[error("Path is not absolute: {0}")]
    RelativePath(String),

    #[error("Not a local file URI: {0}")]
    NotLocal(String),

    #[error("Invalid URI '{uri}': {reason}")]
    Invalid { uri: String, reason: String },
}

/// A `file://` URI pointing at a local file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileUri(Url);

impl FileUri {
    /// Builds the URI of an absolute path
    pub fn from_path(path: &Path) -> Result<Self, FileUriError> {
        Url::from_file_path(path)
            .map(Self)
            .map_err(|()| FileUriError::RelativePath(path.display().to_string()))
    }

    /// Parses a `file://` URI
    pub fn parse(uri: &str) -> Result<Self, FileUriError> {
        let url = Url::parse(uri).map_err(|e| FileUriError::Invalid {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "file" {
            return Err(FileUriError::NotLocal(uri.to_string()));
        }

        Ok(Self(url))
    }

    /// Returns the local path this URI points at
    pub fn to_path(&self) -> Result<PathBuf, FileUriError> {
        self.0
            .to_file_path()
            .map_err(|()| FileUriError::NotLocal(self.0.to_string()))
    }

    /// Returns the URI as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
