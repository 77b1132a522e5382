//! Repository traits (interfaces)
//!
//! These traits define the contracts for external dependencies: the
//! filesystem, the thumbnail cache, the icon theme and the output file.

mod directory_reader;
mod overlay_icon;
mod thumbnail_provider;
mod thumbnail_writer;

pub use directory_reader::{ChildEntries, DirectoryReadError, DirectoryReader};
pub use overlay_icon::{OverlayError, OverlayIconSource};
pub use thumbnail_provider::{ProviderError, ThumbnailProvider};
pub use thumbnail_writer::{ThumbnailWriter, WriteResult, WriterError};
