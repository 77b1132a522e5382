//! Recursion budget
//!
//! Bounds how many levels of "directory represented by a directory" may be
//! resolved. A directory whose representative child is another directory
//! needs that child's thumbnail generated first, which may run this whole
//! pipeline again in a new process. The budget is handed down explicitly on
//! each level and decremented once per level.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Remaining levels of directory-in-directory resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecursionBudget(u32);

impl RecursionBudget {
    /// Budget used when none is configured
    pub const DEFAULT: RecursionBudget = RecursionBudget(5);

    /// Creates a budget with `remaining` levels
    pub const fn new(remaining: u32) -> Self {
        Self(remaining)
    }

    /// Returns the number of remaining levels
    pub const fn remaining(&self) -> u32 {
        self.0
    }

    /// Returns whether no further level may be entered
    pub const fn is_exhausted(&self) -> bool {
        self.0 == 0
    }

    /// Returns the budget one level down, or `None` when exhausted
    pub fn descend(&self) -> Option<RecursionBudget> {
        self.0.checked_sub(1).map(RecursionBudget)
    }

    /// Parses a configured budget, falling back to the default
    ///
    /// Returns the budget and, when the value was present but not a valid
    /// non-negative integer, the parse error so the caller can report it.
    pub fn parse_lenient(value: Option<&str>) -> (RecursionBudget, Option<ParseIntError>) {
        match value {
            None => (Self::DEFAULT, None),
            Some(raw) => match raw.trim().parse() {
                Ok(budget) => (budget, None),
                Err(e) => (Self::DEFAULT, Some(e)),
            },
        }
    }
}

impl Default for RecursionBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for RecursionBudget {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(RecursionBudget)
    }
}

impl fmt::Display for RecursionBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
