//! Thumbnail persistence

mod png_writer;

pub use png_writer::PngThumbnailWriter;
