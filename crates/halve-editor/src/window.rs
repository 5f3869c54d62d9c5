//! Window: which part of the buffer is on screen.
//!
//! A `Window` holds only scroll state: the first visible line and how many
//! lines fit. It doesn't own the buffer or cursor; those are passed in as
//! parameters, so one window can show different buffers over its lifetime.
//!
//! ```text
//!  buffer          window (top_line = 2, height = 3)
//!  0 ┆ ...
//!  1 ┆ ...
//!  2 ┆ ...   ┐
//!  3 ┆ ...   │ visible
//!  4 ┆ ...   ┘
//!  5 ┆ ...
//! ```
//!
//! A window taller than what remains of the buffer shows fewer lines: the
//! last visible line is clamped to the buffer's last line.

use crate::buffer::Buffer;
use crate::cursor::Cursor;

/// Default window height, in lines.
pub const DEFAULT_HEIGHT: usize = 24;

/// Vertical scroll state of a view onto a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First visible buffer line (0-indexed).
    top_line: usize,

    /// Number of text lines the window can show. Never zero.
    height: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT)
    }
}

impl Window {
    /// A window scrolled to the top. A zero height is raised to 1.
    #[must_use]
    pub fn new(height: usize) -> Self {
        Self {
            top_line: 0,
            height: height.max(1),
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// First visible buffer line (0-indexed).
    #[inline]
    #[must_use]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// First visible line (0-indexed), clamped to the buffer.
    #[must_use]
    pub fn first_visible_line(&self, buf: &Buffer) -> usize {
        self.top_line.min(buf.line_count().saturating_sub(1))
    }

    /// Last visible line (0-indexed), clamped to the buffer.
    #[must_use]
    pub fn last_visible_line(&self, buf: &Buffer) -> usize {
        let last = buf.line_count().saturating_sub(1);
        self.top_line.saturating_add(self.height - 1).min(last)
    }

    /// True when `line` (0-indexed) is on screen.
    #[must_use]
    pub fn is_visible(&self, line: usize, buf: &Buffer) -> bool {
        (self.first_visible_line(buf)..=self.last_visible_line(buf)).contains(&line)
    }

    // -- Scrolling ----------------------------------------------------------

    /// Put `line` at the top of the window, clamped to the buffer.
    pub fn scroll_to(&mut self, line: usize, buf: &Buffer) {
        self.top_line = line.min(buf.line_count().saturating_sub(1));
    }

    /// Scroll the text up by `count` lines (later lines come into view).
    pub fn scroll_down_by(&mut self, count: usize, buf: &Buffer) {
        self.scroll_to(self.top_line.saturating_add(count), buf);
    }

    /// Scroll the text down by `count` lines (earlier lines come into view).
    pub fn scroll_up_by(&mut self, count: usize, buf: &Buffer) {
        self.scroll_to(self.top_line.saturating_sub(count), buf);
    }

    /// Adjust the scroll position so the cursor's line is visible.
    pub const fn ensure_cursor_visible(&mut self, cursor: &Cursor) {
        let line = cursor.line();
        if line < self.top_line {
            self.top_line = line;
        }
        if line >= self.top_line.saturating_add(self.height) {
            self.top_line = line - (self.height - 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
