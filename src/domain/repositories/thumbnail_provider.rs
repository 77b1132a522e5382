//! Thumbnail provider trait
//!
//! Defines the interface to the thumbnail cache and the thumbnail
//! generators behind it.

use crate::domain::entities::{FileUri, RecursionBudget, ThumbnailImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a thumbnail provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to load thumbnail '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to generate thumbnail for '{uri}': {source:#}")]
    Generation {
        uri: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Access to a thumbnail cache and to thumbnail generation
///
/// Modification times are seconds since the epoch; a cached or failed entry
/// only counts when it was recorded for the same modification time.
///
/// # Example
///
/// ```ignore
/// let provider = FreedesktopThumbnailProvider::new(cache_root, ThumbnailSize::Normal);
/// if let Some(path) = provider.lookup(&uri, mtime) {
///     let image = provider.load(&path)?;
/// }
/// ```
pub trait ThumbnailProvider: Send + Sync {
    /// Returns the path of an up-to-date cached thumbnail, if one exists
    fn lookup(&self, uri: &FileUri, modified: i64) -> Option<PathBuf>;

    /// Returns whether generating a thumbnail for this file already failed
    /// for the same modification time
    fn has_valid_failed_thumbnail(&self, uri: &FileUri, modified: i64) -> bool;

    /// Returns whether files of this MIME type can be thumbnailed at all
    fn can_thumbnail(&self, uri: &FileUri, mime_type: &str, modified: i64) -> bool;

    /// Generates a thumbnail
    ///
    /// `budget` is the recursion budget the generation itself runs with. A
    /// generator that recurses into this pipeline must hand it on unchanged.
    /// Such a failure may only mean the budget ran out, so it must not be
    /// recorded as a failed thumbnail.
    fn generate(
        &self,
        uri: &FileUri,
        mime_type: &str,
        modified: i64,
        budget: RecursionBudget,
    ) -> Result<ThumbnailImage, ProviderError>;

    /// Loads a cached thumbnail returned by [`ThumbnailProvider::lookup`]
    fn load(&self, path: &Path) -> Result<ThumbnailImage, ProviderError> {
        image::open(path)
            .map(ThumbnailImage::from)
            .map_err(|source| ProviderError::Load {
                path: path.to_path_buf(),
                source,
            })
    }
}
