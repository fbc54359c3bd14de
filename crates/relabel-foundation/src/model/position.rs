//! Zero-based positions and ranges within a buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based row/column position.
///
/// Columns count Unicode scalar values within the row. Ordering is document
/// order: by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePosition {
    pub row: u32,
    pub column: u32,
}

impl SourcePosition {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A half-open range `[start, end)` between two positions.
///
/// Well-formed ranges have `end >= start`; `is_well_formed` checks this since
/// ranges coming from the analysis backend are not trusted blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    pub const fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Shorthand for a range given as `(row, column)` pairs
    pub const fn from_coords(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: SourcePosition::new(start.0, start.1),
            end: SourcePosition::new(end.0, end.1),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.end >= self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `position` lies within the range, end exclusive
    pub fn contains(&self, position: SourcePosition) -> bool {
        self.start <= position && position < self.end
    }

    /// Whether the two ranges share any position.
    ///
    /// Identical ranges always overlap, including empty ones: two edits at the
    /// same spot have no well-defined application order.
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        if self == other {
            return true;
        }
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.start, self.end)
    }
}
