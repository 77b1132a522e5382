//! Thumbnail generators
//!
//! Produces fresh thumbnails for files missing from the cache. Images are
//! decoded in-process; directories are handed to a nested run of the
//! directory thumbnailer.

use crate::domain::entities::{DIRECTORY_CONTENT_TYPE, RecursionBudget, ThumbnailImage, ThumbnailSize};
use anyhow::{Context, Result, bail};
use image::{ImageFormat, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Files larger than this are not decoded
pub const MAXIMUM_IMAGE_FILE_SIZE: u64 = 24 * 1024 * 1024;

/// How a file of a given MIME type is thumbnailed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Decoded with the `image` crate
    Image(ImageFormat),
    /// Thumbnailed by running the directory thumbnailer on it
    Directory,
}

impl GeneratorKind {
    /// Picks the generator for `mime_type`
    ///
    /// Directories only have a generator when `directories` is set.
    pub fn for_mime_type(mime_type: &str, directories: bool) -> Option<Self> {
        if mime_type == DIRECTORY_CONTENT_TYPE {
            return directories.then_some(GeneratorKind::Directory);
        }

        ImageFormat::from_mime_type(mime_type)
            .filter(ImageFormat::reading_enabled)
            .map(GeneratorKind::Image)
    }
}

/// Decodes `path` and shrinks it to fit `size`
pub fn generate_image(path: &Path, size: ThumbnailSize) -> Result<ThumbnailImage> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to stat '{}'", path.display()))?;
    if metadata.len() > MAXIMUM_IMAGE_FILE_SIZE {
        bail!(
            "'{}' is too large to thumbnail ({} bytes, limit {})",
            path.display(),
            metadata.len(),
            MAXIMUM_IMAGE_FILE_SIZE
        );
    }

    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read '{}'", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode '{}'", path.display()))?;

    let edge = size.pixel_size();
    let image = if image.width() > edge || image.height() > edge {
        image.thumbnail(edge, edge)
    } else {
        image
    };

    Ok(ThumbnailImage::from(image))
}

/// Runs the directory thumbnailer on a child directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGenerator {
    program: PathBuf,
    cache_root: PathBuf,
}

impl DirectoryGenerator {
    /// Creates a generator running `program` against the cache at `cache_root`
    pub fn new(program: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cache_root: cache_root.into(),
        }
    }

    /// Thumbnails `directory` in a child process
    ///
    /// `budget` is passed on unchanged; the caller has already spent this
    /// level's share of it.
    pub fn generate(
        &self,
        directory: &Path,
        size: ThumbnailSize,
        budget: RecursionBudget,
    ) -> Result<ThumbnailImage> {
        let output = tempfile::Builder::new()
            .prefix("directory-thumbnail-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary output file")?;

        tracing::debug!(
            program = %self.program.display(),
            directory = %directory.display(),
            %budget,
            "Running nested thumbnailer"
        );

        let result = Command::new(&self.program)
            .arg("--recursion-budget")
            .arg(budget.to_string())
            .arg("--size")
            .arg(size.pixel_size().to_string())
            .arg("--thumbnail-cache")
            .arg(&self.cache_root)
            .arg("--")
            .arg(directory)
            .arg(output.path())
            .output()
            .with_context(|| format!("Failed to run '{}'", self.program.display()))?;

        if !result.status.success() {
            bail!(
                "Nested thumbnailer exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }

        let image = image::open(output.path()).with_context(|| {
            format!("Failed to load nested thumbnail '{}'", output.path().display())
        })?;

        Ok(ThumbnailImage::from(image))
    }
}
