//! Application layer
//!
//! Use cases that orchestrate the domain: scanning, resolving, compositing
//! and the complete directory pipeline.

mod compositor;
pub mod dto;
mod error;
mod pick_representative;
mod resolve_thumbnail;
mod thumbnail_directory;

pub use compositor::{CompositionError, Compositor, Overlay};
pub use error::{ExitStatus, ThumbnailerError};
pub use pick_representative::{PickRepresentativeUseCase, ScanError};
pub use resolve_thumbnail::{ResolveThumbnailUseCase, ThumbnailError};
pub use thumbnail_directory::ThumbnailDirectoryUseCase;
