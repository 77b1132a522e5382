//! Data Transfer Objects

mod thumbnail_request;

pub use thumbnail_request::ThumbnailRequest;
