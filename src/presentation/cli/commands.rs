//! CLI arguments using clap

use crate::application::dto::ThumbnailRequest;
use crate::domain::entities::{FileUri, FileUriError, RecursionBudget};
use crate::infrastructure::thumbnail_cache::CachePaths;
use clap::Parser;
use std::path::PathBuf;

const FILE_URI_PREFIX: &str = "file:";

/// directory-thumbnailer - Directory thumbnails for file managers
///
/// Picks the most interesting child of a directory and uses its thumbnail,
/// optionally with a folder icon drawn on top, as the directory's thumbnail.
#[derive(Parser, Debug)]
#[command(name = "directory-thumbnailer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Create a thumbnail for a directory", long_about = None)]
pub struct Cli {
    /// Directory to thumbnail, as a path or file:// URI
    pub input: String,

    /// Where to write the PNG thumbnail
    pub output: PathBuf,

    /// Maximum width and height of the thumbnail in pixels
    #[arg(short, long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    /// Draw a folder icon over the thumbnail
    #[arg(long)]
    pub overlay: bool,

    /// Icon file to draw instead of the themed folder icon
    #[arg(long, value_name = "PATH")]
    pub overlay_icon: Option<PathBuf>,

    /// How many more levels of directories inside directories may be
    /// thumbnailed
    #[arg(long, value_name = "N")]
    pub recursion_budget: Option<String>,

    /// Root of the thumbnail cache
    #[arg(long, value_name = "DIR")]
    pub thumbnail_cache: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Returns the input directory, resolving `file://` URIs
    pub fn input_path(&self) -> Result<PathBuf, FileUriError> {
        if self.input.starts_with(FILE_URI_PREFIX) {
            FileUri::parse(&self.input)?.to_path()
        } else {
            Ok(PathBuf::from(&self.input))
        }
    }

    /// Returns the configured recursion budget
    ///
    /// An unparsable value is reported with a warning and replaced by the
    /// default.
    pub fn budget(&self) -> RecursionBudget {
        let (budget, error) = RecursionBudget::parse_lenient(self.recursion_budget.as_deref());
        if let Some(e) = error {
            tracing::warn!(
                value = self.recursion_budget.as_deref().unwrap_or_default(),
                error = %e,
                default = %budget,
                "Invalid recursion budget, using the default"
            );
        }
        budget
    }

    /// Returns the thumbnail cache root
    pub fn cache_root(&self) -> Option<PathBuf> {
        self.thumbnail_cache.clone().or_else(CachePaths::default_root)
    }

    /// Builds the request for the thumbnail pipeline
    pub fn to_request(&self) -> Result<ThumbnailRequest, FileUriError> {
        Ok(ThumbnailRequest::new(self.input_path()?, &self.output)
            .with_max_dimension(self.size)
            .with_overlay(self.overlay)
            .with_recursion_budget(self.budget()))
    }
}
