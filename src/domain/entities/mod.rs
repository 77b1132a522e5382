//! Domain entities
//!
//! Core objects of the directory thumbnailing domain.

mod child_entry;
mod file_kind;
mod file_uri;
mod recursion_budget;
mod scored_candidate;
mod thumbnail_image;
mod thumbnail_size;

pub use child_entry::{ChildEntry, DIRECTORY_CONTENT_TYPE, UNKNOWN_CONTENT_TYPE};
pub use file_kind::FileKind;
pub use file_uri::{FileUri, FileUriError};
pub use recursion_budget::RecursionBudget;
pub use scored_candidate::{Interestingness, ScoredCandidate};
pub use thumbnail_image::ThumbnailImage;
pub use thumbnail_size::{OverlayTier, ThumbnailSize};
