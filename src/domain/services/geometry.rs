//! Thumbnail geometry
//!
//! Pure calculations behind the compositor: proportional downscaling and
//! placement of the folder overlay.

use crate::domain::entities::OverlayTier;
use thiserror::Error;

/// Scaling would produce an image with a zero-length edge
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Scaling {width}×{height} to fit {max_dimension} pixels gives an empty image")]
pub struct DegenerateImage {
    pub width: u32,
    pub height: u32,
    pub max_dimension: u32,
}

/// Computes the dimensions of an image scaled down to fit `max_dimension`
///
/// Returns `Ok(None)` when no scaling is needed: no limit was given, or the
/// image already fits. Images are never scaled up.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    max_dimension: Option<u32>,
) -> Result<Option<(u32, u32)>, DegenerateImage> {
    let Some(max_dimension) = max_dimension else {
        return Ok(None);
    };

    let largest = width.max(height);
    if largest == 0 {
        return Ok(None);
    }

    let scale = f64::from(max_dimension) / f64::from(largest);
    if scale >= 1.0 {
        return Ok(None);
    }

    let scaled_width = scale_edge(width, scale);
    let scaled_height = scale_edge(height, scale);

    if scaled_width == 0 || scaled_height == 0 {
        return Err(DegenerateImage {
            width,
            height,
            max_dimension,
        });
    }

    Ok(Some((scaled_width, scaled_height)))
}

fn scale_edge(edge: u32, scale: f64) -> u32 {
    // Never larger than `edge`, since scale < 1.
    (f64::from(edge) * scale).round() as u32
}

/// Where and how large the folder overlay is drawn on a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPlacement {
    /// Edge length of the square icon in pixels
    pub icon_size: u32,
    /// Horizontal position of the icon's top-left corner
    pub x: i64,
    /// Vertical position of the icon's top-left corner
    pub y: i64,
}

impl OverlayPlacement {
    /// Scales the tier's nominal geometry to a thumbnail of the given size
    ///
    /// A thumbnail smaller than the tier's reference size gets a
    /// proportionally smaller icon, placed proportionally closer to the
    /// corner. The icon is at least one pixel.
    pub fn compute(tier: OverlayTier, width: u32, height: u32) -> Self {
        let factor = f64::from(width.max(height)) / f64::from(tier.reference_size);

        let icon_size = ((f64::from(tier.icon_size) * factor).round() as u32).max(1);
        let offset = (f64::from(tier.offset) * factor).round() as i64;

        Self {
            icon_size,
            x: offset,
            y: offset,
        }
    }
}
