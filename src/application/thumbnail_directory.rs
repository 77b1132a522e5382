//! Thumbnail directory use case
//!
//! Runs the whole pipeline for one directory: pick the most interesting
//! child, resolve its thumbnail, scale it, draw the overlay and save it.

use crate::application::compositor::{Compositor, Overlay};
use crate::application::dto::ThumbnailRequest;
use crate::application::error::ThumbnailerError;
use crate::application::pick_representative::{PickRepresentativeUseCase, ScanError};
use crate::application::resolve_thumbnail::ResolveThumbnailUseCase;
use crate::domain::entities::ThumbnailImage;
use crate::domain::repositories::{
    DirectoryReadError, DirectoryReader, OverlayIconSource, ThumbnailProvider, ThumbnailWriter,
    WriteResult,
};
use std::sync::Arc;

/// Thumbnail directory use case
///
/// If the chosen child cannot be thumbnailed the directory gets no
/// thumbnail; the runner-up is never tried.
pub struct ThumbnailDirectoryUseCase {
    reader: Arc<dyn DirectoryReader>,
    provider: Arc<dyn ThumbnailProvider>,
    overlay: Arc<dyn OverlayIconSource>,
    writer: Arc<dyn ThumbnailWriter>,
    picker: PickRepresentativeUseCase,
    resolver: ResolveThumbnailUseCase,
    compositor: Compositor,
}

impl ThumbnailDirectoryUseCase {
    /// Creates a new use case
    pub fn new(
        reader: Arc<dyn DirectoryReader>,
        provider: Arc<dyn ThumbnailProvider>,
        overlay: Arc<dyn OverlayIconSource>,
        writer: Arc<dyn ThumbnailWriter>,
    ) -> Self {
        Self {
            reader,
            provider,
            overlay,
            writer,
            picker: PickRepresentativeUseCase::default(),
            resolver: ResolveThumbnailUseCase::new(),
            compositor: Compositor::new(),
        }
    }

    /// Creates the thumbnail image for `request.input` without saving it
    pub fn create_thumbnail(
        &self,
        request: &ThumbnailRequest,
    ) -> Result<ThumbnailImage, ThumbnailerError> {
        let directory = std::path::absolute(&request.input).map_err(|source| {
            ThumbnailerError::ScanFailed {
                path: request.input.clone(),
                source: ScanError::Read(DirectoryReadError::Open {
                    path: request.input.clone(),
                    source,
                }),
            }
        })?;

        tracing::info!(
            directory = %directory.display(),
            budget = %request.recursion_budget,
            "Creating thumbnail for directory"
        );

        let candidate = self
            .picker
            .execute(&directory, self.reader.as_ref(), self.provider.as_ref())
            .map_err(|source| ThumbnailerError::ScanFailed {
                path: directory.clone(),
                source,
            })?;

        let Some(candidate) = candidate else {
            return Err(ThumbnailerError::EmptyDirectory { path: directory });
        };

        tracing::info!(
            child = %candidate.entry().path().display(),
            score = %candidate.score(),
            "Picked representative child"
        );

        let (entry, uri, _) = candidate.into_parts();

        let image = self.resolver.execute(
            &uri,
            entry.content_type(),
            entry.modified(),
            self.provider.as_ref(),
            request.recursion_budget,
        )?;

        let overlay = request.show_overlay.then(|| Overlay {
            source: self.overlay.as_ref(),
            size: request.size_class(),
        });

        Ok(self
            .compositor
            .finalize(image, request.max_dimension, overlay)?)
    }

    /// Creates the thumbnail and saves it to `request.output`
    pub fn execute(&self, request: &ThumbnailRequest) -> Result<WriteResult, ThumbnailerError> {
        let image = self.create_thumbnail(request)?;

        tracing::debug!(output = %request.output.display(), "Saving thumbnail");

        let result = self
            .writer
            .write(&image, &request.output)
            .map_err(|source| ThumbnailerError::SaveFailed {
                path: request.output.clone(),
                source,
            })?;

        tracing::info!(
            output = %result.saved_path.display(),
            bytes = result.saved_size,
            "Thumbnail saved"
        );

        Ok(result)
    }
}
