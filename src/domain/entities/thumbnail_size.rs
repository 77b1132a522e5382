//! Thumbnail size classes
//!
//! The freedesktop.org thumbnail cache knows two size classes. The class
//! decides which cache directory entries live in, which size nested
//! invocations are asked for, and how large the folder overlay is drawn.

use std::fmt;

/// Thumbnail size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailSize {
    /// Up to 128×128 pixels
    Normal,
    /// Up to 256×256 pixels
    Large,
}

/// Size and position of the folder overlay for one size class, given for a
/// thumbnail that fills the whole class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTier {
    /// Nominal icon edge length in pixels
    pub icon_size: u32,
    /// Distance of the icon from the top-left corner in pixels
    pub offset: u32,
    /// Thumbnail edge length the nominal values are given for
    pub reference_size: u32,
}

impl ThumbnailSize {
    /// Picks the size class for a requested maximum output dimension
    ///
    /// No limit or a limit up to 128 pixels maps to `Normal`.
    pub fn for_output_size(max_dimension: Option<u32>) -> Self {
        match max_dimension {
            Some(size) if size > ThumbnailSize::Normal.pixel_size() => ThumbnailSize::Large,
            _ => ThumbnailSize::Normal,
        }
    }

    /// Returns the maximum edge length of this class
    pub fn pixel_size(&self) -> u32 {
        match self {
            ThumbnailSize::Normal => 128,
            ThumbnailSize::Large => 256,
        }
    }

    /// Returns the cache subdirectory name of this class
    pub fn directory_name(&self) -> &'static str {
        match self {
            ThumbnailSize::Normal => "normal",
            ThumbnailSize::Large => "large",
        }
    }

    /// Returns the overlay geometry of this class
    pub fn overlay_tier(&self) -> OverlayTier {
        match self {
            ThumbnailSize::Normal => OverlayTier {
                icon_size: 32,
                offset: 4,
                reference_size: 128,
            },
            ThumbnailSize::Large => OverlayTier {
                icon_size: 64,
                offset: 8,
                reference_size: 256,
            },
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directory_name())
    }
}
