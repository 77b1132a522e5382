//! Thumbnail request DTO

use crate::domain::entities::{RecursionBudget, ThumbnailSize};
use std::path::PathBuf;

/// Everything needed to thumbnail one directory
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    /// Directory to thumbnail
    pub input: PathBuf,
    /// Where to save the PNG
    pub output: PathBuf,
    /// Maximum width or height of the result (`None` = unlimited)
    pub max_dimension: Option<u32>,
    /// Whether to draw the folder overlay
    pub show_overlay: bool,
    /// Remaining directory-in-directory levels
    pub recursion_budget: RecursionBudget,
}

impl Default for ThumbnailRequest {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            max_dimension: None,
            show_overlay: false,
            recursion_budget: RecursionBudget::DEFAULT,
        }
    }
}

impl ThumbnailRequest {
    /// Creates a request thumbnailing `input` into `output`
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum output dimension
    pub fn with_max_dimension(mut self, max_dimension: Option<u32>) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Enables the folder overlay
    pub fn with_overlay(mut self, show_overlay: bool) -> Self {
        self.show_overlay = show_overlay;
        self
    }

    /// Sets the recursion budget
    pub fn with_recursion_budget(mut self, budget: RecursionBudget) -> Self {
        self.recursion_budget = budget;
        self
    }

    /// Returns the size class matching the requested dimension
    pub fn size_class(&self) -> ThumbnailSize {
        ThumbnailSize::for_output_size(self.max_dimension)
    }
}
