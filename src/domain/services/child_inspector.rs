//! Child inspector
//!
//! Scores directory children by how well they would represent the whole
//! directory as a thumbnail. Higher is better.
//!
//! The rules are deliberately simple and tunable:
//!
//! | rule                                   | adjustment |
//! |----------------------------------------|-----------:|
//! | base                                   |         +1 |
//! | regular file, symlink or shortcut      |        +20 |
//! | special file or mountable              |        +10 |
//! | directory                              |         +5 |
//! | unknown kind                           |         +0 |
//! | hidden or backup                       |         −5 |
//! | failed before, or cannot be thumbnailed|        −20 |
//! | `image/*` content type                 |         +5 |
//!
//! Directories score low so that one is only picked when nothing better
//! exists, since thumbnailing a directory recurses.
//!
//! When a rule changes, [`MAX_INTERESTINGNESS`] has to be updated too; a
//! compile-time assertion checks it against the rule constants.

use crate::domain::entities::{ChildEntry, FileKind, FileUri, Interestingness};
use crate::domain::repositories::ThumbnailProvider;

const BASE_SCORE: u32 = 1;

const REGULAR_WEIGHT: i64 = 20;
const SPECIAL_WEIGHT: i64 = 10;
const DIRECTORY_WEIGHT: i64 = 5;
const UNKNOWN_WEIGHT: i64 = 0;

const HIDDEN_OR_BACKUP_PENALTY: i64 = 5;

// Kept separate so the two can be weighted differently later.
const FAILED_THUMBNAIL_PENALTY: i64 = 20;
const UNTHUMBNAILABLE_PENALTY: i64 = 20;

const IMAGE_BONUS: i64 = 5;

const IMAGE_MIME_PREFIX: &str = "image/";

/// The highest score any child can reach
pub const MAX_INTERESTINGNESS: u32 = 26;

const fn max_kind_weight() -> i64 {
    let mut max = UNKNOWN_WEIGHT;
    let weights = [REGULAR_WEIGHT, SPECIAL_WEIGHT, DIRECTORY_WEIGHT, UNKNOWN_WEIGHT];
    let mut i = 0;
    while i < weights.len() {
        if weights[i] > max {
            max = weights[i];
        }
        i += 1;
    }
    max
}

const _: () = assert!(
    MAX_INTERESTINGNESS as i64 == BASE_SCORE as i64 + max_kind_weight() + IMAGE_BONUS,
    "MAX_INTERESTINGNESS is out of date with the scoring rules"
);

/// Scores directory children
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildInspector;

impl ChildInspector {
    /// Creates a new inspector
    pub fn new() -> Self {
        Self
    }

    /// Returns the weight for a kind of child
    pub fn kind_weight(kind: FileKind) -> i64 {
        match kind {
            FileKind::Regular | FileKind::SymbolicLink | FileKind::Shortcut => REGULAR_WEIGHT,
            FileKind::Special | FileKind::Mountable => SPECIAL_WEIGHT,
            FileKind::Directory => DIRECTORY_WEIGHT,
            FileKind::Unknown => UNKNOWN_WEIGHT,
        }
    }

    /// Returns whether a content type denotes an image
    pub fn is_image(content_type: &str) -> bool {
        content_type.starts_with(IMAGE_MIME_PREFIX)
    }

    /// Scores `entry`, whose URI is `uri`
    ///
    /// The result is always within `[1, MAX_INTERESTINGNESS]`.
    pub fn score<P>(&self, entry: &ChildEntry, uri: &FileUri, provider: &P) -> Interestingness
    where
        P: ThumbnailProvider + ?Sized,
    {
        let mut score = Interestingness::new(BASE_SCORE);

        score = score.adjust(Self::kind_weight(entry.kind()));

        if entry.is_hidden() || entry.is_backup() {
            score = score.adjust(-HIDDEN_OR_BACKUP_PENALTY);
        }

        if provider.has_valid_failed_thumbnail(uri, entry.modified()) {
            score = score.adjust(-FAILED_THUMBNAIL_PENALTY);
        } else if !provider.can_thumbnail(uri, entry.content_type(), entry.modified()) {
            score = score.adjust(-UNTHUMBNAILABLE_PENALTY);
        }

        if Self::is_image(entry.content_type()) {
            score = score.adjust(IMAGE_BONUS);
        }

        debug_assert!(score.value() >= 1 && score.value() <= MAX_INTERESTINGNESS);

        score
    }
}
