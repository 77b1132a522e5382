//! Pipeline errors and process exit statuses

use crate::application::compositor::CompositionError;
use crate::application::pick_representative::ScanError;
use crate::application::resolve_thumbnail::ThumbnailError;
use crate::domain::repositories::{OverlayError, ProviderError, WriterError};
use crate::domain::services::DegenerateImage;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit statuses
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    InvalidOptions = 1,
    ErrorGeneratingThumbnail = 2,
    EmptyDirectory = 3,
    ErrorSavingThumbnail = 4,
    ErrorLoadingOverlay = 5,
}

impl ExitStatus {
    /// Returns the numeric exit code
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Everything that can stop a directory from getting a thumbnail
#[derive(Error, Debug)]
pub enum ThumbnailerError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Directory is empty.")]
    EmptyDirectory { path: PathBuf },

    #[error("Error generating thumbnail for file '{uri}': MIME type '{mime_type}' is unsupported.")]
    UnsupportedType { uri: String, mime_type: String },

    #[error("Error generating thumbnail for file '{uri}': recursion limit reached.")]
    RecursionLimitReached { uri: String },

    #[error("Error generating thumbnail for file '{uri}': thumbnailing failed before.")]
    KnownFailedThumbnail { uri: String },

    #[error("Error generating thumbnail for file '{uri}': {source}")]
    GenerationFailed {
        uri: String,
        #[source]
        source: ProviderError,
    },

    #[error("Error loading cached thumbnail '{}': {source}", path.display())]
    CacheLoadFailed {
        path: PathBuf,
        #[source]
        source: ProviderError,
    },

    #[error(transparent)]
    DegenerateImage(#[from] DegenerateImage),

    #[error("{source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: WriterError,
    },

    #[error("Couldn't load overlay icon: {0}")]
    OverlayLoadFailed(#[source] OverlayError),

    #[error("{source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: ScanError,
    },
}

impl ThumbnailerError {
    /// Returns the exit status reported for this error
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            ThumbnailerError::InvalidArguments(_) => ExitStatus::InvalidOptions,
            ThumbnailerError::EmptyDirectory { .. } => ExitStatus::EmptyDirectory,
            ThumbnailerError::UnsupportedType { .. }
            | ThumbnailerError::RecursionLimitReached { .. }
            | ThumbnailerError::KnownFailedThumbnail { .. }
            | ThumbnailerError::GenerationFailed { .. }
            | ThumbnailerError::CacheLoadFailed { .. }
            | ThumbnailerError::DegenerateImage(_)
            | ThumbnailerError::ScanFailed { .. } => ExitStatus::ErrorGeneratingThumbnail,
            ThumbnailerError::SaveFailed { .. } => ExitStatus::ErrorSavingThumbnail,
            ThumbnailerError::OverlayLoadFailed(_) => ExitStatus::ErrorLoadingOverlay,
        }
    }

    /// Returns the numeric exit code reported for this error
    pub fn exit_code(&self) -> u8 {
        self.exit_status().code()
    }

    /// Returns whether the error happened while saving the result
    pub fn is_save_error(&self) -> bool {
        matches!(self, ThumbnailerError::SaveFailed { .. })
    }
}

impl From<ThumbnailError> for ThumbnailerError {
    fn from(err: ThumbnailError) -> Self {
        match err {
            ThumbnailError::CacheLoad { path, source } => {
                ThumbnailerError::CacheLoadFailed { path, source }
            }
            ThumbnailError::KnownFailure { uri } => ThumbnailerError::KnownFailedThumbnail { uri },
            ThumbnailError::UnsupportedType { uri, mime_type } => {
                ThumbnailerError::UnsupportedType { uri, mime_type }
            }
            ThumbnailError::RecursionLimitReached { uri } => {
                ThumbnailerError::RecursionLimitReached { uri }
            }
            ThumbnailError::GenerationFailed { uri, source } => {
                ThumbnailerError::GenerationFailed { uri, source }
            }
        }
    }
}

impl From<CompositionError> for ThumbnailerError {
    fn from(err: CompositionError) -> Self {
        match err {
            CompositionError::Degenerate(e) => ThumbnailerError::DegenerateImage(e),
            CompositionError::OverlayLoad(e) => ThumbnailerError::OverlayLoadFailed(e),
        }
    }
}
