//! Cursor: position tracking with movement and a sticky column.
//!
//! The `Cursor` tracks a position in a buffer and the column vertical motion
//! tries to return to. It does not own the buffer; movement methods take it
//! as a parameter.
//!
//! The cursor may sit anywhere in `0..=content_len` of its line, the
//! end-of-line slot included, the way Emacs point does.
//!
//! # Sticky column
//!
//! When moving vertically, the cursor remembers the column it was at. If it
//! moves through a short line and then reaches a long line again, it snaps
//! back to the remembered column. Any other movement resets the sticky column.

use crate::buffer::Buffer;
use crate::position::Position;

/// A cursor in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Current position in the buffer.
    pos: Position,

    /// Remembered column for vertical movement.
    sticky_col: usize,
}

impl Cursor {
    /// A cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: Position::ZERO,
            sticky_col: 0,
        }
    }

    /// A cursor at `pos`, taken as given. Motions clamp it on first use.
    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            pos,
            sticky_col: pos.col,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Current line (0-indexed).
    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    /// Current column (0-indexed, char offset).
    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    /// The desired column for vertical movement.
    #[inline]
    #[must_use]
    pub const fn sticky_col(&self) -> usize {
        self.sticky_col
    }

    /// The absolute char offset of the cursor in `buf`.
    #[must_use]
    pub fn offset(&self, buf: &Buffer) -> usize {
        buf.pos_to_offset(self.pos)
            .unwrap_or_else(|| buf.line_to_char(self.pos.line) + self.pos.col)
    }

    // -- Direct positioning -------------------------------------------------

    /// Move to an exact position, clamped to buffer bounds. Resets the
    /// sticky column.
    pub fn set_position(&mut self, pos: Position, buf: &Buffer) {
        self.pos = buf.clamp_position(pos);
        self.sticky_col = self.pos.col;
    }

    /// Move to an absolute char offset, clamped to the buffer. Resets the
    /// sticky column.
    pub fn set_offset(&mut self, offset: usize, buf: &Buffer) {
        self.set_position(buf.offset_to_pos(offset), buf);
    }

    // -- Horizontal movement ------------------------------------------------

    /// Move back `count` characters. A line break counts as one character
    /// whatever its terminator, so this wraps to the end of the previous line.
    pub fn move_left(&mut self, count: usize, buf: &Buffer) {
        let mut pos = buf.clamp_position(self.pos);
        let mut remaining = count;
        while remaining > pos.col {
            if pos.line == 0 {
                remaining = pos.col;
                break;
            }
            remaining -= pos.col + 1;
            pos.line -= 1;
            pos.col = buf.line_content_len(pos.line).unwrap_or(0);
        }
        pos.col -= remaining;
        self.pos = pos;
        self.sticky_col = pos.col;
    }

    /// Move forward `count` characters, wrapping onto following lines.
    /// Stops at the end of the buffer.
    pub fn move_right(&mut self, count: usize, buf: &Buffer) {
        let last_line = buf.line_count().saturating_sub(1);
        let mut pos = buf.clamp_position(self.pos);
        let mut remaining = count;
        loop {
            let len = buf.line_content_len(pos.line).unwrap_or(0);
            let room = len - pos.col;
            if remaining <= room {
                pos.col += remaining;
                break;
            }
            if pos.line >= last_line {
                pos.col = len;
                break;
            }
            remaining -= room + 1;
            pos.line += 1;
            pos.col = 0;
        }
        self.pos = pos;
        self.sticky_col = pos.col;
    }

    /// Move to column 0.
    pub const fn move_to_line_start(&mut self) {
        self.pos.col = 0;
        self.sticky_col = 0;
    }

    /// Move to the end of the line's content.
    pub fn move_to_line_end(&mut self, buf: &Buffer) {
        self.pos.col = buf.line_content_len(self.pos.line).unwrap_or(0);
        self.sticky_col = self.pos.col;
    }

    // -- Vertical movement --------------------------------------------------

    /// Move up by `count` lines, keeping the sticky column where possible.
    pub fn move_up(&mut self, count: usize, buf: &Buffer) {
        self.pos.line = self.pos.line.saturating_sub(count);
        self.apply_sticky(buf);
    }

    /// Move down by `count` lines, keeping the sticky column where possible.
    pub fn move_down(&mut self, count: usize, buf: &Buffer) {
        let last_line = buf.line_count().saturating_sub(1);
        self.pos.line = self.pos.line.saturating_add(count).min(last_line);
        self.apply_sticky(buf);
    }

    /// Move `delta` lines: down when positive, up when negative.
    pub fn move_by_lines(&mut self, delta: isize, buf: &Buffer) {
        if delta < 0 {
            self.move_up(delta.unsigned_abs(), buf);
        } else {
            self.move_down(delta.unsigned_abs(), buf);
        }
    }

    fn apply_sticky(&mut self, buf: &Buffer) {
        let max_col = buf.line_content_len(self.pos.line).unwrap_or(0);
        self.pos.col = self.sticky_col.min(max_col);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
