//! Overlay icon sources

mod file_overlay_icon;
mod themed_folder_icon;

pub use file_overlay_icon::FileOverlayIcon;
pub use themed_folder_icon::ThemedFolderIcon;

use crate::domain::entities::ThumbnailImage;
use image::DynamicImage;
use image::imageops::{self, FilterType};

/// Resizes an icon to exactly `size`×`size`
fn scale_icon(icon: &DynamicImage, size: u32) -> ThumbnailImage {
    let pixels = icon.to_rgba8();
    if pixels.dimensions() == (size, size) {
        return ThumbnailImage::new(pixels);
    }

    ThumbnailImage::new(imageops::resize(&pixels, size, size, FilterType::Triangle))
}
