//! Directory thumbnailer
//!
//! Creates a thumbnail for a directory by picking its most interesting
//! child and reusing that child's thumbnail, scaled down and optionally
//! decorated with a folder icon.
//!
//! The crate is split into layers:
//! - `domain`: entities, the scoring rules and the ports to the outside
//! - `application`: the use cases making up the pipeline
//! - `infrastructure`: filesystem, thumbnail cache and icon theme access
//! - `presentation`: the command line interface

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dto::ThumbnailRequest;
pub use application::{ExitStatus, ThumbnailDirectoryUseCase, ThumbnailerError};
