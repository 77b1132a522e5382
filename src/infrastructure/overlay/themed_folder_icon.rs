//! Themed folder icon
//!
//! Finds the `folder` icon of the installed icon themes, following the XDG
//! icon theme directory layout (`<data dir>/icons/<theme>/<N>x<N>/places/`).

use super::scale_icon;
use crate::domain::entities::ThumbnailImage;
use crate::domain::repositories::{OverlayError, OverlayIconSource};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const ICON_NAME: &str = "folder";
const ICON_CONTEXT: &str = "places";
const THEMES: [&str; 2] = ["Adwaita", "hicolor"];
const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Folder icon looked up in the installed icon themes
#[derive(Debug, Clone)]
pub struct ThemedFolderIcon {
    data_dirs: Vec<PathBuf>,
}

impl ThemedFolderIcon {
    /// Searches the user data directory and `$XDG_DATA_DIRS`
    pub fn new() -> Self {
        let system_dirs = env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());

        let data_dirs = dirs::data_dir()
            .into_iter()
            .chain(env::split_paths(&system_dirs))
            .collect();

        Self::with_data_dirs(data_dirs)
    }

    /// Searches only `data_dirs`, in order
    pub fn with_data_dirs(data_dirs: Vec<PathBuf>) -> Self {
        Self { data_dirs }
    }

    /// Returns the best icon file for `size`
    ///
    /// Themes are tried in order. Within a theme the smallest icon at least
    /// `size` pixels wide wins, otherwise the largest one.
    pub fn find(&self, size: u32) -> Option<PathBuf> {
        THEMES.iter().find_map(|theme| {
            let candidates: Vec<(u32, PathBuf)> = self
                .data_dirs
                .iter()
                .flat_map(|dir| sized_icons(&dir.join("icons").join(theme)))
                .collect();

            let larger = candidates
                .iter()
                .filter(|(edge, _)| *edge >= size)
                .min_by_key(|(edge, _)| *edge);
            let largest = candidates.iter().max_by_key(|(edge, _)| *edge);

            larger.or(largest).map(|(_, path)| path.clone())
        })
    }
}

impl Default for ThemedFolderIcon {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayIconSource for ThemedFolderIcon {
    fn load_icon(&self, size: u32) -> Result<ThumbnailImage, OverlayError> {
        if size == 0 {
            return Err(OverlayError::InvalidSize(size));
        }

        let path = self.find(size).ok_or_else(|| OverlayError::NotFound {
            name: ICON_NAME.to_string(),
        })?;

        tracing::debug!(path = %path.display(), size, "Loading folder icon");

        let icon = image::open(&path).map_err(|source| OverlayError::Load { path, source })?;
        Ok(scale_icon(&icon, size))
    }
}

/// Lists `<theme dir>/<N>x<N>/places/folder.png` files with their edge length
fn sized_icons(theme_dir: &Path) -> Vec<(u32, PathBuf)> {
    let Ok(entries) = fs::read_dir(theme_dir) else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let edge = square_size(&entry.file_name().to_string_lossy())?;
            let path = entry
                .path()
                .join(ICON_CONTEXT)
                .join(format!("{ICON_NAME}.png"));
            path.is_file().then_some((edge, path))
        })
        .collect()
}

/// Parses directory names like `48x48`
fn square_size(name: &str) -> Option<u32> {
    let (width, height) = name.split_once('x')?;
    let width: u32 = width.parse().ok()?;
    (height.parse::<u32>().ok()? == width).then_some(width)
}
