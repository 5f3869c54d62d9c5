//! The host interface: what an editor must provide.
//!
//! Bisection only needs a handful of primitives from the editor it runs in:
//! where the cursor is, where lines start and end, what part of the buffer is
//! visible, and a way to move. [`Host`] is exactly that surface.
//!
//! # Coordinates
//!
//! - Offsets are **char** offsets from the start of the buffer.
//! - Line numbers are **1-based**, matching what an editor shows in its
//!   status line. The first line of a buffer is line 1.
//!
//! The "last dispatched command" is deliberately not part of this trait. It
//! travels as an explicit [`CommandLog`](crate::command::CommandLog) argument
//! so the chain state is visible at every call site.

/// Editor primitives consumed by the scope adapters.
pub trait Host {
    /// The cursor's absolute char offset.
    fn cursor_offset(&self) -> usize;

    /// Move the cursor to an absolute char offset.
    fn set_cursor_offset(&mut self, offset: usize);

    /// Offset of the first char of the line containing `offset`.
    fn line_start(&self, offset: usize) -> usize;

    /// Offset one past the last content char of the line containing `offset`
    /// (the position of its line terminator, or the end of the buffer).
    fn line_end(&self, offset: usize) -> usize;

    /// 1-based number of the line containing `offset`.
    fn line_number(&self, offset: usize) -> usize;

    /// Move the cursor `delta` lines down (negative: up). Where the cursor
    /// lands horizontally is up to the host; callers fix the column after.
    fn move_cursor_by_lines(&mut self, delta: isize);

    /// 1-based number of the first line visible in the window.
    fn window_first_visible_line(&self) -> usize;

    /// 1-based number of the last line visible in the window.
    fn window_last_visible_line(&self) -> usize;

    /// 1-based number of the buffer's first line. Usually 1, but a narrowed
    /// buffer may start later.
    fn buffer_first_line(&self) -> usize;

    /// 1-based number of the buffer's last line.
    fn buffer_last_line(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod fake {
    //! A line-oriented in-memory host for exercising the core without an
    //! editor.

    use super::Host;

    /// Lines of text plus a cursor and a visible window.
    #[derive(Debug, Clone)]
    pub struct FakeHost {
        lines: Vec<String>,
        /// Char offset of the start of each line.
        starts: Vec<usize>,
        pub cursor: usize,
        pub window: (usize, usize),
        /// Set to report the window's bounds in reverse order.
        pub invert_window: bool,
    }

    impl FakeHost {
        pub fn new(text: &str) -> Self {
            let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
            let mut starts = Vec::with_capacity(lines.len());
            let mut acc = 0;
            for line in &lines {
                starts.push(acc);
                acc += line.chars().count() + 1;
            }
            let count = lines.len();
            Self {
                lines,
                starts,
                cursor: 0,
                window: (1, count),
                invert_window: false,
            }
        }

        /// Place the cursor at a 1-based line and 0-based column.
        pub fn at(mut self, line: usize, col: usize) -> Self {
            self.cursor = self.starts[line - 1] + col;
            self
        }

        pub fn with_window(mut self, first: usize, last: usize) -> Self {
            self.window = (first, last);
            self
        }

        /// (1-based line, 0-based column) of the cursor.
        pub fn line_col(&self) -> (usize, usize) {
            let line = self.line_number(self.cursor);
            (line, self.cursor - self.starts[line - 1])
        }

        fn line_len(&self, idx: usize) -> usize {
            self.lines[idx].chars().count()
        }
    }

    impl Host for FakeHost {
        fn cursor_offset(&self) -> usize {
            self.cursor
        }

        fn set_cursor_offset(&mut self, offset: usize) {
            self.cursor = offset;
        }

        fn line_start(&self, offset: usize) -> usize {
            self.starts[self.line_number(offset) - 1]
        }

        fn line_end(&self, offset: usize) -> usize {
            let idx = self.line_number(offset) - 1;
            self.starts[idx] + self.line_len(idx)
        }

        fn line_number(&self, offset: usize) -> usize {
            self.starts.partition_point(|&s| s <= offset).max(1)
        }

        fn move_cursor_by_lines(&mut self, delta: isize) {
            let current = self.line_number(self.cursor) - 1;
            let target = current
                .saturating_add_signed(delta)
                .min(self.lines.len() - 1);
            // Like most editors' raw line motion: land at the line start.
            self.cursor = self.starts[target];
        }

        fn window_first_visible_line(&self) -> usize {
            if self.invert_window {
                self.window.1
            } else {
                self.window.0
            }
        }

        fn window_last_visible_line(&self) -> usize {
            if self.invert_window {
                self.window.0
            } else {
                self.window.1
            }
        }

        fn buffer_first_line(&self) -> usize {
            1
        }

        fn buffer_last_line(&self) -> usize {
            self.lines.len()
        }
    }
}
