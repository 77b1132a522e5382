//! Overlay icon loaded from an explicit file

use super::scale_icon;
use crate::domain::entities::ThumbnailImage;
use crate::domain::repositories::{OverlayError, OverlayIconSource};
use std::path::PathBuf;

/// Overlay icon read from a fixed path
#[derive(Debug, Clone)]
pub struct FileOverlayIcon {
    path: PathBuf,
}

impl FileOverlayIcon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OverlayIconSource for FileOverlayIcon {
    fn load_icon(&self, size: u32) -> Result<ThumbnailImage, OverlayError> {
        if size == 0 {
            return Err(OverlayError::InvalidSize(size));
        }

        let icon = image::open(&self.path).map_err(|source| OverlayError::Load {
            path: self.path.clone(),
            source,
        })?;

        Ok(scale_icon(&icon, size))
    }
}
