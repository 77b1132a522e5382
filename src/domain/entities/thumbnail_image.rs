//! Thumbnail image entity
//!
//! Decoded RGBA pixels of a thumbnail. Each pipeline stage takes ownership
//! and may hand back a replacement (for example after scaling).

use image::{DynamicImage, RgbaImage};

/// An RGBA thumbnail image
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailImage {
    pixels: RgbaImage,
}

impl ThumbnailImage {
    /// Wraps an RGBA buffer
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Creates an image filled with a single color
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    /// Returns the width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Returns the height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns the largest of width and height
    pub fn max_dimension(&self) -> u32 {
        self.width().max(self.height())
    }

    /// Returns the pixel buffer
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Returns the pixel buffer mutably
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Consumes self and returns the pixel buffer
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

impl From<DynamicImage> for ThumbnailImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }
}

impl From<RgbaImage> for ThumbnailImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}
