//! In-memory thumbnail provider
//!
//! Scripted cache and generator results for tests. Every file type is
//! thumbnailable unless marked otherwise, and every generation request is
//! recorded together with the budget it was given.

use crate::domain::entities::{FileUri, RecursionBudget, ThumbnailImage};
use crate::domain::repositories::{ProviderError, ThumbnailProvider};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const CACHE_PREFIX: &str = "memory://cache/";

/// A recorded call to [`ThumbnailProvider::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub uri: String,
    pub mime_type: String,
    pub budget: RecursionBudget,
}

/// Thumbnail provider backed by in-memory maps
#[derive(Debug, Default)]
pub struct InMemoryThumbnailProvider {
    cached: HashMap<String, Option<ThumbnailImage>>,
    failed: HashSet<String>,
    unsupported_types: HashSet<String>,
    generated: HashMap<String, ThumbnailImage>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl InMemoryThumbnailProvider {
    /// Creates a provider with an empty cache that cannot generate anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a thumbnail for `uri` into the cache
    pub fn with_cached(mut self, uri: &FileUri, image: ThumbnailImage) -> Self {
        self.cached.insert(uri.to_string(), Some(image));
        self
    }

    /// Puts an entry for `uri` into the cache that fails to load
    pub fn with_unreadable_cache_entry(mut self, uri: &FileUri) -> Self {
        self.cached.insert(uri.to_string(), None);
        self
    }

    /// Records that thumbnailing `uri` failed before
    pub fn with_failed(mut self, uri: &FileUri) -> Self {
        self.failed.insert(uri.to_string());
        self
    }

    /// Marks a MIME type as not thumbnailable
    pub fn with_unsupported_type(mut self, mime_type: impl Into<String>) -> Self {
        self.unsupported_types.insert(mime_type.into());
        self
    }

    /// Makes generation for `uri` produce `image`
    pub fn with_generated(mut self, uri: &FileUri, image: ThumbnailImage) -> Self {
        self.generated.insert(uri.to_string(), image);
        self
    }

    /// Returns every generation request made so far, in order
    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn cache_path(uri: &str) -> PathBuf {
        PathBuf::from(format!("{CACHE_PREFIX}{uri}"))
    }
}

impl ThumbnailProvider for InMemoryThumbnailProvider {
    fn lookup(&self, uri: &FileUri, _modified: i64) -> Option<PathBuf> {
        let key = uri.to_string();
        self.cached
            .contains_key(&key)
            .then(|| Self::cache_path(&key))
    }

    fn has_valid_failed_thumbnail(&self, uri: &FileUri, _modified: i64) -> bool {
        self.failed.contains(uri.as_str())
    }

    fn can_thumbnail(&self, _uri: &FileUri, mime_type: &str, _modified: i64) -> bool {
        !self.unsupported_types.contains(mime_type)
    }

    fn generate(
        &self,
        uri: &FileUri,
        mime_type: &str,
        _modified: i64,
        budget: RecursionBudget,
    ) -> Result<ThumbnailImage, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(GenerateCall {
                uri: uri.to_string(),
                mime_type: mime_type.to_string(),
                budget,
            });

        self.generated
            .get(uri.as_str())
            .cloned()
            .ok_or_else(|| ProviderError::Generation {
                uri: uri.to_string(),
                source: anyhow::anyhow!("no thumbnail scripted"),
            })
    }

    fn load(&self, path: &Path) -> Result<ThumbnailImage, ProviderError> {
        let key = path
            .to_str()
            .and_then(|path| path.strip_prefix(CACHE_PREFIX))
            .unwrap_or_default();

        match self.cached.get(key) {
            Some(Some(image)) => Ok(image.clone()),
            _ => Err(ProviderError::Load {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "unreadable cache entry",
                )),
            }),
        }
    }
}
