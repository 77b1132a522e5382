//! PNG thumbnail writer implementation
//!
//! Writes finished thumbnails to the local filesystem as PNG.

use crate::domain::entities::ThumbnailImage;
use crate::domain::repositories::{ThumbnailWriter, WriteResult, WriterError};
use image::ImageFormat;
use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::Path;

/// Local PNG writer
///
/// Always encodes PNG, whatever the extension of the output path. Existing
/// files are overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngThumbnailWriter;

impl PngThumbnailWriter {
    /// Creates a new writer
    pub fn new() -> Self {
        Self
    }

    fn encode(image: &ThumbnailImage) -> Result<Vec<u8>, WriterError> {
        let mut png_data = Vec::new();
        image
            .pixels()
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .map_err(|e| WriterError::EncodingError(e.to_string()))?;

        Ok(png_data)
    }
}

impl ThumbnailWriter for PngThumbnailWriter {
    fn write(&self, image: &ThumbnailImage, path: &Path) -> Result<WriteResult, WriterError> {
        let data = Self::encode(image)?;

        let mut output_file = File::create(path).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => {
                WriterError::PermissionDenied(path.display().to_string())
            }
            io::ErrorKind::NotFound => WriterError::DirectoryNotFound(
                path.parent()
                    .unwrap_or(path)
                    .display()
                    .to_string(),
            ),
            _ => WriterError::IoError(e),
        })?;
        output_file.write_all(&data)?;
        output_file.sync_all()?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Saved thumbnail");

        Ok(WriteResult {
            saved_path: path.to_path_buf(),
            saved_size: data.len() as u64,
        })
    }
}
