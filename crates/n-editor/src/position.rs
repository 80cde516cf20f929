//! Text coordinates.
//!
//! The document addresses text by **char index**: a count of Unicode
//! scalar values from the start of the buffer, which is what `ropey`
//! indexes by. The shell needs `(line, col)` to draw the cursor and to move
//! it up and down, so [`Position`] exists for that conversion only; no
//! document operation takes one.
//!
//! Both are 0-indexed. The status line converts to 1-indexed for display.

use std::fmt;
use std::ops::Range;

/// A `(line, col)` pair, both 0-indexed. `col` counts chars, not bytes.
///
/// Ordered line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// A selected span of chars, `[start, end)`, with `start <= end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two ends in either order.
    #[must_use]
    pub fn ordered(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}
