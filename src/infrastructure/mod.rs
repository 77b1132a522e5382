//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories.
//! This layer contains all filesystem, image codec and process access.

pub mod directory;
pub mod overlay;
pub mod persistence;
pub mod thumbnail_cache;
