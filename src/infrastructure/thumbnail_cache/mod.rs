//! Thumbnail cache and generators

mod cache_paths;
mod freedesktop_provider;
mod generators;
mod in_memory;
mod png_text;

pub use cache_paths::{CachePaths, FAILED_APPLICATION_NAME};
pub use freedesktop_provider::FreedesktopThumbnailProvider;
pub use generators::{DirectoryGenerator, GeneratorKind, MAXIMUM_IMAGE_FILE_SIZE};
pub use in_memory::{GenerateCall, InMemoryThumbnailProvider};
pub use png_text::{THUMB_MTIME, THUMB_URI, read_text_chunks};
