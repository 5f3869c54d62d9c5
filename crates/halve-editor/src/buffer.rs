//! Text buffer: rope-backed text storage with offset/line conversion.
//!
//! A `Buffer` wraps a [`ropey::Rope`] and answers the questions navigation
//! asks: how many lines there are, where a line starts and where its content
//! ends, and how char offsets map to `(line, col)` positions.
//!
//! # Design choices
//!
//! - **ropey** gives O(log n) line indexing and correct Unicode handling. We
//!   build a small API on top rather than reimplementing text structures.
//!
//! - **Offsets and columns are chars**, not bytes. Column 3 of `"café"` is
//!   `'é'`. Byte offsets never leak into the public API.
//!
//! - **Line content excludes the terminator.** `\n`, `\r\n` and a lone `\r`
//!   all end a line; the end-of-line position is where the terminator starts.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use crate::position::Position;

/// A text buffer backed by a rope.
///
/// # Coordinate system
///
/// Positions are 0-indexed `(line, col)` pairs; offsets are absolute char
/// indices. Use [`pos_to_offset`](Self::pos_to_offset) and
/// [`offset_to_pos`](Self::offset_to_pos) to convert.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            rope: Rope::from_str(&text),
            path: Some(path.to_path_buf()),
        })
    }

    // -- Text access --------------------------------------------------------

    /// The file this buffer was loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Total number of lines. An empty buffer has 1 line (the empty line).
    /// A buffer ending with `\n` has a trailing empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// A line by 0-indexed number, including its terminator. `None` past the
    /// last line.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.rope.len_lines()).then(|| self.rope.line(line))
    }

    /// Number of chars in a line **excluding** any trailing line ending
    /// (`\n`, `\r\n`, `\r`). The cursor may sit anywhere in `0..=content_len`.
    ///
    /// Returns `None` if the line doesn't exist.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|rope_line| {
            let total = rope_line.len_chars();
            if total == 0 {
                return 0;
            }
            match rope_line.char(total - 1) {
                '\n' if total >= 2 && rope_line.char(total - 2) == '\r' => total - 2,
                '\n' | '\r' => total - 1,
                // Last line with no trailing newline.
                _ => total,
            }
        })
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Offset of the first char of `line`. Lines past the end clamp to the
    /// last line.
    #[must_use]
    pub fn line_to_char(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.last_line()))
    }

    /// 0-indexed line containing `offset`. Offsets past the end clamp to the
    /// end of the buffer.
    #[must_use]
    pub fn char_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp_offset(offset))
    }

    /// Offset one past the last content char of `line` (where its terminator
    /// starts, or the end of the buffer).
    #[must_use]
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        self.rope.line_to_char(line) + self.line_content_len(line).unwrap_or(0)
    }

    /// Convert a `Position` to an absolute char offset.
    ///
    /// Returns `None` if the line is out of bounds or the column goes past
    /// the line's content. A column equal to the content length is the
    /// end-of-line position and is valid.
    #[must_use]
    pub fn pos_to_offset(&self, pos: Position) -> Option<usize> {
        let content_len = self.line_content_len(pos.line)?;
        if pos.col > content_len {
            return None;
        }
        Some(self.rope.line_to_char(pos.line) + pos.col)
    }

    /// Convert a char offset to a `Position`. Offsets past the end clamp to
    /// the end of the buffer.
    #[must_use]
    pub fn offset_to_pos(&self, offset: usize) -> Position {
        let offset = self.clamp_offset(offset);
        let line = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line);
        Position::new(line, offset - line_start)
    }

    /// Clamp an offset to `0..=len_chars()`.
    #[inline]
    #[must_use]
    pub fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// Clamp a position to the nearest valid one: the last line at most, and
    /// at most the end of that line's content.
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        let max_col = self.line_content_len(line).unwrap_or(0);
        Position::new(line, pos.col.min(max_col))
    }

    #[inline]
    fn last_line(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn empty_text_has_one_line() {
        let buf = Buffer::from_text("");
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.line_count(), 1); // empty buffer has one empty line
        assert!(buf.path().is_none());
    }

    #[test]
    fn from_text_basic() {
        let buf = Buffer::from_text("hello\nworld\n");
        assert_eq!(buf.len_chars(), 12);
        assert_eq!(buf.line_count(), 3); // "hello\n", "world\n", ""
        assert_eq!(buf.line(1).unwrap().to_string(), "world\n");
    }

    #[test]
    fn from_file_reads_text_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "alpha\nbeta").unwrap();

        let buf = Buffer::from_file(&path).unwrap();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.path(), Some(path.as_path()));
    }

    #[test]
    fn from_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Buffer::from_file(&dir.path().join("missing.txt")).is_err());
    }

    // -- Lines --------------------------------------------------------------

    #[test]
    fn line_out_of_bounds() {
        let buf = Buffer::from_text("one\ntwo");
        assert_eq!(buf.line(1).unwrap().to_string(), "two");
        assert!(buf.line(2).is_none());
        assert_eq!(buf.line_content_len(2), None);
    }

    #[test]
    fn content_len_strips_terminators() {
        let buf = Buffer::from_text("lf\ncrlf\r\ncr\rlast");
        assert_eq!(buf.line_content_len(0), Some(2));
        assert_eq!(buf.line_content_len(1), Some(4));
        assert_eq!(buf.line_content_len(2), Some(2));
        assert_eq!(buf.line_content_len(3), Some(4));
    }

    #[test]
    fn content_len_of_empty_lines() {
        let buf = Buffer::from_text("\n\n");
        assert_eq!(buf.line_content_len(0), Some(0));
        assert_eq!(buf.line_content_len(2), Some(0));
    }

    #[test]
    fn line_end_is_terminator_position() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.line_end(0), 5);
        assert_eq!(buf.line_end(1), 11);
        // Past the end clamps to the last line.
        assert_eq!(buf.line_end(9), 11);
    }

    // -- Coordinate conversion ----------------------------------------------

    #[test]
    fn line_and_char_conversion() {
        let buf = Buffer::from_text("ab\ncde\nf");
        assert_eq!(buf.line_to_char(0), 0);
        assert_eq!(buf.line_to_char(1), 3);
        assert_eq!(buf.line_to_char(2), 7);
        assert_eq!(buf.line_to_char(50), 7);
        assert_eq!(buf.char_to_line(0), 0);
        assert_eq!(buf.char_to_line(2), 0); // the '\n' belongs to line 0
        assert_eq!(buf.char_to_line(3), 1);
        assert_eq!(buf.char_to_line(500), 2);
    }

    #[test]
    fn pos_to_offset_valid_and_end_of_line() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.pos_to_offset(Position::new(0, 0)), Some(0));
        assert_eq!(buf.pos_to_offset(Position::new(1, 2)), Some(8));
        assert_eq!(buf.pos_to_offset(Position::new(0, 5)), Some(5));
    }

    #[test]
    fn pos_to_offset_out_of_bounds() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.pos_to_offset(Position::new(0, 6)), None);
        assert_eq!(buf.pos_to_offset(Position::new(2, 0)), None);
    }

    #[test]
    fn offset_to_pos_clamps() {
        let buf = Buffer::from_text("hello\nworld");
        assert_eq!(buf.offset_to_pos(0), Position::new(0, 0));
        assert_eq!(buf.offset_to_pos(6), Position::new(1, 0));
        assert_eq!(buf.offset_to_pos(11), Position::new(1, 5));
        assert_eq!(buf.offset_to_pos(99), Position::new(1, 5));
    }

    #[test]
    fn clamp_position_and_offset() {
        let buf = Buffer::from_text("hi\nthere");
        assert_eq!(buf.clamp_position(Position::new(0, 10)), Position::new(0, 2));
        assert_eq!(buf.clamp_position(Position::new(7, 1)), Position::new(1, 1));
        assert_eq!(buf.clamp_offset(100), 8);
        assert_eq!(buf.clamp_offset(3), 3);
    }

    #[test]
    fn unicode_columns_are_chars() {
        let buf = Buffer::from_text("café\nñu");
        assert_eq!(buf.line_content_len(0), Some(4));
        assert_eq!(buf.pos_to_offset(Position::new(1, 1)), Some(6));
        assert_eq!(buf.offset_to_pos(3), Position::new(0, 3));
    }

    #[test]
    fn empty_buffer_conversions() {
        let buf = Buffer::from_text("");
        assert_eq!(buf.line_end(0), 0);
        assert_eq!(buf.offset_to_pos(5), Position::ZERO);
        assert_eq!(buf.clamp_position(Position::new(3, 3)), Position::ZERO);
    }
}
