//! Scored candidate entity
//!
//! A directory child together with its URI and interestingness score.

use super::child_entry::ChildEntry;
use super::file_uri::FileUri;
use std::fmt;

/// How suitable a child is to represent its directory
///
/// Always at least 1. Adjustments saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interestingness(u32);

impl Interestingness {
    /// The lowest possible score
    pub const MIN: Interestingness = Interestingness(1);

    /// Creates a score, clamping 0 up to the minimum
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::MIN } else { Self(value) }
    }

    /// Returns the score value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Adds `delta`, keeping the result inside `[1, u32::MAX]`
    pub fn adjust(self, delta: i64) -> Self {
        let adjusted = (i64::from(self.0) + delta).clamp(1, i64::from(u32::MAX));
        Self(u32::try_from(adjusted).unwrap_or(u32::MAX))
    }
}

impl Default for Interestingness {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Interestingness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A child chosen (so far) as the representative of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    entry: ChildEntry,
    uri: FileUri,
    score: Interestingness,
}

impl ScoredCandidate {
    /// Creates a new candidate
    pub fn new(entry: ChildEntry, uri: FileUri, score: Interestingness) -> Self {
        Self { entry, uri, score }
    }

    /// Returns the child metadata
    pub fn entry(&self) -> &ChildEntry {
        &self.entry
    }

    /// Returns the child URI
    pub fn uri(&self) -> &FileUri {
        &self.uri
    }

    /// Returns the score
    pub fn score(&self) -> Interestingness {
        self.score
    }

    /// Consumes self and returns its parts
    pub fn into_parts(self) -> (ChildEntry, FileUri, Interestingness) {
        (self.entry, self.uri, self.score)
    }
}
