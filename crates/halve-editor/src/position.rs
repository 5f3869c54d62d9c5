//! Text positions.
//!
//! All coordinates are **0-indexed**. Line 0 is the first line, column 0 is the
//! first character. Columns count Unicode scalar values (chars), not bytes or
//! grapheme clusters, which is how `ropey` indexes text.
//!
//! The navigation core talks in char offsets and 1-based line numbers. The
//! conversion between the two systems lives in [`Buffer`](crate::buffer::Buffer)
//! and the [`Editor`](crate::editor::Editor)'s `Host` impl, never here.

use std::fmt;

/// A position in a text buffer: (line, column), both 0-indexed.
///
/// `col` is the char offset from the start of the line, **not** a byte offset.
/// For the line `"café\n"`, column 3 is `'é'` and column 4 is the end of the
/// line, where the cursor sits after `end-of-line`.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column. This means
/// `Position { line: 0, col: 5 }` < `Position { line: 1, col: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// The 1-based line number, as the navigation core and status lines use.
    #[inline]
    #[must_use]
    pub const fn line_number(self) -> usize {
        self.line + 1
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for humans, like an editor's `line:col` mode line.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
