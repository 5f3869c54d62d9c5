//! Column cache for the vertical scopes.
//!
//! Window and buffer bisection move the cursor between lines. Without help
//! the horizontal position would drift to wherever the host's line motion
//! leaves it. The cache records the column once, when a chain starts, and
//! reapplies it after every vertical step of that chain. This works like a
//! sticky column that only a fresh chain can reset.
//!
//! Target lines shorter than the cached column put the cursor at end of line.
//! The cache itself is never shortened, so a later step onto a long enough
//! line restores the exact original column.

use crate::host::Host;

/// The horizontal offset captured at the start of a vertical chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnCache {
    column: Option<usize>,
}

impl ColumnCache {
    #[must_use]
    pub const fn new() -> Self {
        Self { column: None }
    }

    /// The cached column, if a chain has captured one.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Option<usize> {
        self.column
    }

    /// Record the cursor's current distance from the start of its line.
    pub fn capture<H: Host + ?Sized>(&mut self, host: &H) {
        let offset = host.cursor_offset();
        let column = offset.saturating_sub(host.line_start(offset));
        self.column = Some(column);
    }

    /// Forget the cached column.
    pub const fn clear(&mut self) {
        self.column = None;
    }

    /// Place the cursor on its current line at the cached column, or at end
    /// of line when the line is shorter. No-op when nothing was captured.
    pub fn apply<H: Host + ?Sized>(&self, host: &mut H) {
        let Some(column) = self.column else {
            return;
        };
        let offset = host.cursor_offset();
        let start = host.line_start(offset);
        let end = host.line_end(offset);
        let len = end.saturating_sub(start);
        host.set_cursor_offset(start + column.min(len));
    }
}
