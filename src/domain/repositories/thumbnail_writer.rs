//! Thumbnail writer trait
//!
//! Defines the interface for saving the finished thumbnail.

use crate::domain::entities::ThumbnailImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when saving a thumbnail
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    EncodingError(String),
}

/// Result of saving a thumbnail
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Path where the thumbnail was saved
    pub saved_path: PathBuf,
    /// Size in bytes of the saved file
    pub saved_size: u64,
}

/// Trait for saving thumbnails
///
/// Existing files at the destination are overwritten.
pub trait ThumbnailWriter: Send + Sync {
    /// Writes `image` to `path`
    fn write(&self, image: &ThumbnailImage, path: &Path) -> Result<WriteResult, WriterError>;
}
