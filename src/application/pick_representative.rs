//! Pick representative use case
//!
//! Lists a directory and picks the child that best represents it.

use crate::domain::entities::{ChildEntry, FileKind, FileUri, FileUriError, ScoredCandidate};
use crate::domain::repositories::{DirectoryReadError, DirectoryReader, ThumbnailProvider};
use crate::domain::services::{ChildInspector, MAX_INTERESTINGNESS};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while scanning a directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Read(#[from] DirectoryReadError),

    #[error("Invalid child path: {0}")]
    Uri(#[from] FileUriError),
}

/// Pick representative use case
///
/// Scores every immediate child of a directory with the
/// [`ChildInspector`] and keeps the best one. Symbolic links to
/// directories are ignored entirely: following them could loop forever
/// through the recursion into directory representatives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickRepresentativeUseCase {
    inspector: ChildInspector,
}

impl PickRepresentativeUseCase {
    /// Creates a new use case
    pub fn new(inspector: ChildInspector) -> Self {
        Self { inspector }
    }

    /// Executes the scan
    ///
    /// Returns `Ok(None)` for an empty directory. The first child to reach a
    /// given score wins ties, and the scan stops as soon as a child reaches
    /// the maximum score. A read error after some candidate was found is
    /// ignored and that candidate is returned.
    pub fn execute<R, P>(
        &self,
        directory: &Path,
        reader: &R,
        provider: &P,
    ) -> Result<Option<ScoredCandidate>, ScanError>
    where
        R: DirectoryReader + ?Sized,
        P: ThumbnailProvider + ?Sized,
    {
        let mut best: Option<ScoredCandidate> = None;

        for child in reader.read_children(directory)? {
            let entry = match child {
                Ok(entry) => entry,
                Err(e) => match best {
                    Some(ref candidate) => {
                        tracing::debug!(
                            directory = %directory.display(),
                            best = candidate.entry().name(),
                            error = %e,
                            "Ignoring read error, a candidate was already found"
                        );
                        break;
                    }
                    None => return Err(e.into()),
                },
            };

            if self.is_directory_symlink(directory, &entry, reader) {
                tracing::debug!(
                    name = entry.name(),
                    "Skipping symlink to a directory, it could cause an infinite loop"
                );
                continue;
            }

            let uri = FileUri::from_path(entry.path())?;
            let score = self.inspector.score(&entry, &uri, provider);

            tracing::debug!(name = entry.name(), %score, "Examined child");

            let is_better = best
                .as_ref()
                .is_none_or(|candidate| score > candidate.score());

            if is_better {
                tracing::debug!(path = %entry.path().display(), %score, "New most interesting child");
                best = Some(ScoredCandidate::new(entry, uri, score));

                if score.value() >= MAX_INTERESTINGNESS {
                    tracing::debug!(
                        max = MAX_INTERESTINGNESS,
                        "Interestingness reached the maximum, stopping scan"
                    );
                    break;
                }
            }
        }

        Ok(best)
    }

    fn is_directory_symlink<R>(&self, directory: &Path, entry: &ChildEntry, reader: &R) -> bool
    where
        R: DirectoryReader + ?Sized,
    {
        if entry.kind() != FileKind::SymbolicLink {
            return false;
        }

        let target: PathBuf = match entry.resolved_symlink_target(directory) {
            Some(target) => target,
            None => entry.path().to_path_buf(),
        };

        tracing::debug!(
            name = entry.name(),
            target = %target.display(),
            "Checking symlink target"
        );

        reader.target_kind(&target).is_directory()
    }
}
