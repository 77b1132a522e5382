//! Overlay icon trait
//!
//! Defines where the folder icon drawn over directory thumbnails comes
//! from.

use crate::domain::entities::ThumbnailImage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the overlay icon
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Icon '{name}' not found in any icon theme")]
    NotFound { name: String },

    #[error("Failed to load icon '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid icon size: {0}")]
    InvalidSize(u32),
}

/// Trait for loading the overlay icon
pub trait OverlayIconSource: Send + Sync {
    /// Loads the icon scaled to exactly `size`×`size` pixels
    fn load_icon(&self, size: u32) -> Result<ThumbnailImage, OverlayError>;
}
