//! Freedesktop thumbnail provider
//!
//! Looks thumbnails up in, and stores them into, a thumbnail cache laid out
//! per the freedesktop.org thumbnail specification. Cache entries are only
//! valid for the modification time recorded in their `Thumb::MTime` chunk.

use super::cache_paths::CachePaths;
use super::generators::{DirectoryGenerator, GeneratorKind, generate_image};
use super::png_text::{THUMB_MTIME, THUMB_URI, insert_text_chunks, read_text_chunks};
use crate::domain::entities::{FileUri, RecursionBudget, ThumbnailImage, ThumbnailSize};
use crate::domain::repositories::{ProviderError, ThumbnailProvider};
use anyhow::{Context, anyhow};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Thumbnail provider backed by the freedesktop.org thumbnail cache
#[derive(Debug, Clone)]
pub struct FreedesktopThumbnailProvider {
    paths: CachePaths,
    size: ThumbnailSize,
    directories: Option<DirectoryGenerator>,
}

impl FreedesktopThumbnailProvider {
    /// Creates a provider for the cache at `root`, storing `size` thumbnails
    pub fn new(root: impl Into<PathBuf>, size: ThumbnailSize) -> Self {
        Self {
            paths: CachePaths::new(root),
            size,
            directories: None,
        }
    }

    /// Thumbnails directories by running `program` on them
    pub fn with_directory_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.directories = Some(DirectoryGenerator::new(program, self.paths.root()));
        self
    }

    /// Returns the cache layout
    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    fn generator(&self, mime_type: &str) -> Option<GeneratorKind> {
        GeneratorKind::for_mime_type(mime_type, self.directories.is_some())
    }

    fn run_generator(
        &self,
        kind: GeneratorKind,
        uri: &FileUri,
        budget: RecursionBudget,
    ) -> anyhow::Result<ThumbnailImage> {
        let path = uri.to_path()?;

        match kind {
            GeneratorKind::Image(_) => generate_image(&path, self.size),
            GeneratorKind::Directory => self
                .directories
                .as_ref()
                .ok_or_else(|| anyhow!("No directory thumbnailer configured"))?
                .generate(&path, self.size, budget),
        }
    }

    /// Stores `image` in the cache; problems are only logged
    fn save_thumbnail(&self, uri: &FileUri, modified: i64, image: &ThumbnailImage) {
        let path = self.paths.entry(self.size, uri);
        if let Err(e) = write_entry(&path, uri, modified, image.pixels()) {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "Couldn't save thumbnail to cache");
        }
    }

    /// Records that thumbnailing `uri` failed; problems are only logged
    fn save_failed_thumbnail(&self, uri: &FileUri, modified: i64) {
        let path = self.paths.failed_entry(uri);
        let marker = RgbaImage::new(1, 1);
        if let Err(e) = write_entry(&path, uri, modified, &marker) {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "Couldn't save failed thumbnail marker");
        }
    }
}

impl ThumbnailProvider for FreedesktopThumbnailProvider {
    fn lookup(&self, uri: &FileUri, modified: i64) -> Option<PathBuf> {
        let path = self.paths.entry(self.size, uri);
        is_valid_entry(&path, modified).then_some(path)
    }

    fn has_valid_failed_thumbnail(&self, uri: &FileUri, modified: i64) -> bool {
        self.paths
            .failed_entries(uri)
            .iter()
            .any(|path| is_valid_entry(path, modified))
    }

    fn can_thumbnail(&self, _uri: &FileUri, mime_type: &str, _modified: i64) -> bool {
        self.generator(mime_type).is_some()
    }

    fn generate(
        &self,
        uri: &FileUri,
        mime_type: &str,
        modified: i64,
        budget: RecursionBudget,
    ) -> Result<ThumbnailImage, ProviderError> {
        let kind = self.generator(mime_type).ok_or_else(|| ProviderError::Generation {
            uri: uri.to_string(),
            source: anyhow!("No generator for MIME type '{mime_type}'"),
        })?;

        match self.run_generator(kind, uri, budget) {
            Ok(image) => {
                self.save_thumbnail(uri, modified, &image);
                Ok(image)
            }
            Err(source) => {
                // A nested run also fails when its budget runs out.
                if kind != GeneratorKind::Directory {
                    self.save_failed_thumbnail(uri, modified);
                }
                Err(ProviderError::Generation {
                    uri: uri.to_string(),
                    source,
                })
            }
        }
    }
}

/// Returns whether the entry at `path` was recorded for `modified`
fn is_valid_entry(path: &Path, modified: i64) -> bool {
    let Ok(data) = fs::read(path) else {
        return false;
    };

    let recorded = read_text_chunks(&data)
        .get(THUMB_MTIME)
        .and_then(|mtime| mtime.parse::<i64>().ok());

    if recorded != Some(modified) {
        tracing::debug!(path = %path.display(), ?recorded, modified, "Ignoring stale cache entry");
        return false;
    }

    true
}

fn write_entry(path: &Path, uri: &FileUri, modified: i64, pixels: &RgbaImage) -> anyhow::Result<()> {
    let mut encoded = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .context("Failed to encode PNG")?;

    let mtime = modified.to_string();
    let tagged = insert_text_chunks(&encoded, &[(THUMB_URI, uri.as_str()), (THUMB_MTIME, &mtime)])
        .context("Encoded PNG has no header chunk")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    // Readers must never see a partial entry.
    let temporary = path.with_extension("png.part");
    fs::write(&temporary, &tagged)
        .with_context(|| format!("Failed to write '{}'", temporary.display()))?;
    fs::rename(&temporary, path)
        .with_context(|| format!("Failed to rename '{}'", temporary.display()))?;

    Ok(())
}
