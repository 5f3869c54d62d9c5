//! Scope adapters: mapping bisection indices onto the host.
//!
//! Bisection works on plain `usize` indices. Each [`Scope`] decides what an
//! index means and how to get there:
//!
//! | Scope  | Index             | Range                                  | Move                         |
//! |--------|-------------------|----------------------------------------|------------------------------|
//! | Line   | char offset       | `[line_start, line_end]`               | set the offset directly      |
//! | Window | 1-based line no.  | `[first visible, last visible]`        | vertical move + column cache |
//! | Buffer | 1-based line no.  | `[first line, last line]`              | vertical move + column cache |
//!
//! The line scope's upper bound is the offset one past the last content
//! char, so the cursor can reach end of line.
//!
//! Ranges come back as an [`Interval`], which is always ordered. A host that
//! reports its bounds backwards gets normalized here, before the state
//! machine ever sees them.

use tracing::warn;

use crate::column::ColumnCache;
use crate::command::Scope;
use crate::host::Host;
use crate::interval::Interval;

impl Scope {
    /// Where the cursor is, in this scope's index domain.
    #[must_use]
    pub fn current_index<H: Host + ?Sized>(self, host: &H) -> usize {
        let offset = host.cursor_offset();
        match self {
            Self::Line => offset,
            Self::Window | Self::Buffer => host.line_number(offset),
        }
    }

    /// The scope's natural boundaries, normalized so `low <= high`.
    #[must_use]
    pub fn range<H: Host + ?Sized>(self, host: &H) -> Interval {
        let (start, end) = match self {
            Self::Line => {
                let offset = host.cursor_offset();
                (host.line_start(offset), host.line_end(offset))
            }
            Self::Window => (
                host.window_first_visible_line(),
                host.window_last_visible_line(),
            ),
            Self::Buffer => (host.buffer_first_line(), host.buffer_last_line()),
        };
        if start > end {
            warn!(scope = %self, start, end, "host reported an inverted range, swapping");
        }
        Interval::ordered(start, end)
    }

    /// Move the cursor to `index`. Vertical scopes move by whole lines and
    /// then reapply the cached column.
    pub fn move_to<H: Host + ?Sized>(self, host: &mut H, index: usize, column: &ColumnCache) {
        match self {
            Self::Line => host.set_cursor_offset(index),
            Self::Window | Self::Buffer => {
                let current = host.line_number(host.cursor_offset());
                let delta = line_delta(current, index);
                if delta != 0 {
                    host.move_cursor_by_lines(delta);
                }
                column.apply(host);
            }
        }
    }
}

/// Signed distance from line `from` to line `to`, saturating at `isize`'s
/// bounds.
fn line_delta(from: usize, to: usize) -> isize {
    if to >= from {
        isize::try_from(to - from).unwrap_or(isize::MAX)
    } else {
        isize::try_from(from - to).map_or(isize::MIN, |d| -d)
    }
}
