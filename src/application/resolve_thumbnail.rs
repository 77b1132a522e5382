//! Resolve thumbnail use case
//!
//! Turns the chosen child into pixels, either from the thumbnail cache or by
//! generating a new thumbnail.

use crate::domain::entities::{DIRECTORY_CONTENT_TYPE, FileUri, RecursionBudget, ThumbnailImage};
use crate::domain::repositories::{ProviderError, ThumbnailProvider};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a thumbnail
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Cached thumbnail '{}' could not be loaded: {source}", path.display())]
    CacheLoad {
        path: PathBuf,
        #[source]
        source: ProviderError,
    },

    #[error("Thumbnailing '{uri}' failed before and will not be retried")]
    KnownFailure { uri: String },

    #[error("Error generating thumbnail for file '{uri}': MIME type '{mime_type}' is unsupported")]
    UnsupportedType { uri: String, mime_type: String },

    #[error("Error generating thumbnail for file '{uri}': recursion limit reached")]
    RecursionLimitReached { uri: String },

    #[error("Error generating thumbnail for file '{uri}': {source}")]
    GenerationFailed {
        uri: String,
        #[source]
        source: ProviderError,
    },
}

/// Resolve thumbnail use case
///
/// Generation is bounded by a [`RecursionBudget`]: a directory may be
/// represented by a subdirectory, whose thumbnail is generated by running
/// this whole pipeline again, possibly in another process. Only those
/// directory generations spend the budget; it is decremented once per level
/// and handed to the provider, so it survives that process boundary where a
/// call depth would not. Files that do not recurse are generated whatever
/// budget is left.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveThumbnailUseCase;

impl ResolveThumbnailUseCase {
    /// Creates a new use case
    pub fn new() -> Self {
        Self
    }

    /// Executes the resolution
    ///
    /// There is no fallback: any failure leaves the directory without a
    /// thumbnail.
    pub fn execute<P>(
        &self,
        uri: &FileUri,
        mime_type: &str,
        modified: i64,
        provider: &P,
        budget: RecursionBudget,
    ) -> Result<ThumbnailImage, ThumbnailError>
    where
        P: ThumbnailProvider + ?Sized,
    {
        if let Some(path) = provider.lookup(uri, modified) {
            tracing::debug!(%uri, path = %path.display(), "Loading cached thumbnail");

            return provider
                .load(&path)
                .map_err(|source| ThumbnailError::CacheLoad { path, source });
        }

        if provider.has_valid_failed_thumbnail(uri, modified) {
            tracing::debug!(%uri, "Thumbnail failed before");
            return Err(ThumbnailError::KnownFailure {
                uri: uri.to_string(),
            });
        }

        if !provider.can_thumbnail(uri, mime_type, modified) {
            tracing::debug!(%uri, mime_type, "MIME type is unsupported by the thumbnail provider");
            return Err(ThumbnailError::UnsupportedType {
                uri: uri.to_string(),
                mime_type: mime_type.to_string(),
            });
        }

        let child_budget = if mime_type == DIRECTORY_CONTENT_TYPE {
            budget.descend().ok_or_else(|| {
                tracing::debug!(%uri, "Recursion budget exhausted");
                ThumbnailError::RecursionLimitReached {
                    uri: uri.to_string(),
                }
            })?
        } else {
            budget
        };

        tracing::debug!(%uri, mime_type, budget = %child_budget, "Generating thumbnail");

        provider
            .generate(uri, mime_type, modified, child_budget)
            .map_err(|source| ThumbnailError::GenerationFailed {
                uri: uri.to_string(),
                source,
            })
    }
}
