//! Compositor
//!
//! Scales the resolved thumbnail to the requested size and draws the folder
//! overlay on it.

use crate::domain::entities::{ThumbnailImage, ThumbnailSize};
use crate::domain::repositories::{OverlayError, OverlayIconSource};
use crate::domain::services::{DegenerateImage, OverlayPlacement, scaled_dimensions};
use image::imageops::{self, FilterType};
use thiserror::Error;

/// Filter for shrinking the thumbnail itself
const DOWNSCALE_FILTER: FilterType = FilterType::Lanczos3;

/// Errors that can occur while compositing
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateImage),

    #[error("Couldn't load overlay icon: {0}")]
    OverlayLoad(#[from] OverlayError),
}

/// Overlay request: where the icon comes from and which size class the
/// thumbnail was requested in
#[derive(Clone, Copy)]
pub struct Overlay<'a> {
    pub source: &'a dyn OverlayIconSource,
    pub size: ThumbnailSize,
}

/// Thumbnail compositor
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    /// Creates a new compositor
    pub fn new() -> Self {
        Self
    }

    /// Scales `image` to fit `max_dimension` and optionally draws the overlay
    ///
    /// Images are only ever scaled down.
    pub fn finalize(
        &self,
        image: ThumbnailImage,
        max_dimension: Option<u32>,
        overlay: Option<Overlay<'_>>,
    ) -> Result<ThumbnailImage, CompositionError> {
        let mut image = self.scale_down(image, max_dimension)?;

        if let Some(overlay) = overlay {
            self.draw_overlay(&mut image, overlay)?;
        }

        Ok(image)
    }

    /// Scales `image` down to fit `max_dimension`, if needed
    pub fn scale_down(
        &self,
        image: ThumbnailImage,
        max_dimension: Option<u32>,
    ) -> Result<ThumbnailImage, DegenerateImage> {
        let (width, height) = image.dimensions();

        match scaled_dimensions(width, height, max_dimension)? {
            None => Ok(image),
            Some((scaled_width, scaled_height)) => {
                tracing::debug!(
                    width,
                    height,
                    scaled_width,
                    scaled_height,
                    ?max_dimension,
                    "Scaling thumbnail"
                );

                let scaled = imageops::resize(
                    image.pixels(),
                    scaled_width,
                    scaled_height,
                    DOWNSCALE_FILTER,
                );
                Ok(ThumbnailImage::new(scaled))
            }
        }
    }

    fn draw_overlay(
        &self,
        image: &mut ThumbnailImage,
        overlay: Overlay<'_>,
    ) -> Result<(), CompositionError> {
        let (width, height) = image.dimensions();
        let placement = OverlayPlacement::compute(overlay.size.overlay_tier(), width, height);

        tracing::debug!(
            icon_size = placement.icon_size,
            x = placement.x,
            y = placement.y,
            "Drawing folder overlay"
        );

        let icon = overlay.source.load_icon(placement.icon_size)?;
        imageops::overlay(image.pixels_mut(), icon.pixels(), placement.x, placement.y);

        Ok(())
    }
}
