//! Pane: a buffer shown through a window, with a cursor.
//!
//! A `Pane` is the unit bisection navigates in. It owns the three pieces of
//! state the [`Host`] primitives read and write, and it carries the plain
//! cursor motions an editor offers next to navigation.
//!
//! The `Host` impl translates between the two coordinate systems:
//!
//! | `Host` side               | `Pane` side                        |
//! |---------------------------|------------------------------------|
//! | char offset               | [`Cursor::offset`] / `set_offset`  |
//! | 1-based line number       | 0-indexed [`Position::line`] + 1   |
//! | visible lines (1-based)   | [`Window`] first/last visible line |
//!
//! Every cursor motion keeps the cursor on screen by scrolling the window.

use halve_nav::Host;

use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::position::Position;
use crate::window::Window;

/// Lines kept on screen from the previous page when scrolling a full page.
const PAGE_OVERLAP: usize = 2;

/// A buffer, the cursor in it, and the window onto it.
#[derive(Debug)]
pub struct Pane {
    buffer: Buffer,
    cursor: Cursor,
    window: Window,
}

impl Pane {
    /// A pane on `buffer` with the cursor at the origin and a window of
    /// `height` lines scrolled to the top.
    #[must_use]
    pub fn new(buffer: Buffer, height: usize) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            window: Window::new(height),
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The cursor's position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.cursor.position()
    }

    /// The cursor's char offset.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.offset(&self.buffer)
    }

    // -- Placement ----------------------------------------------------------

    /// Put the cursor at `pos` (clamped) and scroll it into view.
    pub fn set_position(&mut self, pos: Position) {
        self.cursor.set_position(pos, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    /// Scroll so `line` (0-indexed) is at the top, then pull the cursor onto
    /// the screen if it fell off.
    pub fn scroll_to(&mut self, line: usize) {
        self.window.scroll_to(line, &self.buffer);
        self.keep_cursor_on_screen();
    }

    // -- Plain motions ------------------------------------------------------

    pub fn forward_char(&mut self) {
        self.cursor.move_right(1, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    pub fn backward_char(&mut self) {
        self.cursor.move_left(1, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    pub fn next_line(&mut self) {
        self.cursor.move_down(1, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    pub fn previous_line(&mut self) {
        self.cursor.move_up(1, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    pub const fn beginning_of_line(&mut self) {
        self.cursor.move_to_line_start();
    }

    pub fn end_of_line(&mut self) {
        self.cursor.move_to_line_end(&self.buffer);
    }

    /// Show the next page: the text moves up, keeping a couple of lines of
    /// overlap.
    pub fn scroll_up(&mut self) {
        self.window.scroll_down_by(self.page(), &self.buffer);
        self.keep_cursor_on_screen();
    }

    /// Show the previous page.
    pub fn scroll_down(&mut self) {
        self.window.scroll_up_by(self.page(), &self.buffer);
        self.keep_cursor_on_screen();
    }

    fn page(&self) -> usize {
        self.window.height().saturating_sub(PAGE_OVERLAP).max(1)
    }

    /// Move the cursor to the nearest visible line, keeping its sticky column.
    fn keep_cursor_on_screen(&mut self) {
        let first = self.window.first_visible_line(&self.buffer);
        let last = self.window.last_visible_line(&self.buffer);
        let line = self.cursor.line();
        if line < first {
            self.cursor.move_down(first - line, &self.buffer);
        } else if line > last {
            self.cursor.move_up(line - last, &self.buffer);
        }
    }
}

impl Host for Pane {
    fn cursor_offset(&self) -> usize {
        self.offset()
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor.set_offset(offset, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    fn line_start(&self, offset: usize) -> usize {
        self.buffer.line_to_char(self.buffer.char_to_line(offset))
    }

    fn line_end(&self, offset: usize) -> usize {
        self.buffer.line_end(self.buffer.char_to_line(offset))
    }

    fn line_number(&self, offset: usize) -> usize {
        self.buffer.char_to_line(offset) + 1
    }

    fn move_cursor_by_lines(&mut self, delta: isize) {
        self.cursor.move_by_lines(delta, &self.buffer);
        self.window.ensure_cursor_visible(&self.cursor);
    }

    fn window_first_visible_line(&self) -> usize {
        self.window.first_visible_line(&self.buffer) + 1
    }

    fn window_last_visible_line(&self) -> usize {
        self.window.last_visible_line(&self.buffer) + 1
    }

    fn buffer_first_line(&self) -> usize {
        1
    }

    fn buffer_last_line(&self) -> usize {
        self.buffer.line_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use halve_nav::{CommandId, CommandLog, NavCommand, Navigator};

    /// 40 numbered lines, line 10 (0-indexed 9) is empty.
    fn pane(height: usize) -> Pane {
        let text: Vec<String> = (1..=40)
            .map(|i| if i == 10 { String::new() } else { format!("line number {i:02}") })
            .collect();
        Pane::new(Buffer::from_text(&text.join("\n")), height)
    }

    // -- Host primitives ----------------------------------------------------

    #[test]
    fn host_line_geometry() {
        let p = pane(10);
        // Each non-empty line is 14 chars plus '\n'.
        assert_eq!(p.line_start(0), 0);
        assert_eq!(p.line_end(0), 14);
        assert_eq!(p.line_start(20), 15);
        assert_eq!(p.line_end(20), 29);
        assert_eq!(p.line_number(0), 1);
        assert_eq!(p.line_number(15), 2);
    }

    #[test]
    fn host_line_number_at_terminator() {
        let p = pane(10);
        // Offset 14 is line 1's '\n'; it still belongs to line 1.
        assert_eq!(p.line_number(14), 1);
        assert_eq!(p.line_end(14), 14);
    }

    #[test]
    fn host_visible_and_buffer_lines_are_one_based() {
        let mut p = pane(10);
        p.scroll_to(5);
        assert_eq!(p.window_first_visible_line(), 6);
        assert_eq!(p.window_last_visible_line(), 15);
        assert_eq!(p.buffer_first_line(), 1);
        assert_eq!(p.buffer_last_line(), 40);
    }

    #[test]
    fn host_set_offset_scrolls_into_view() {
        let mut p = pane(10);
        let offset = p.buffer().line_to_char(30) + 3;
        p.set_cursor_offset(offset);
        assert_eq!(p.position(), Position::new(30, 3));
        assert!(p.window().is_visible(30, p.buffer()));
        assert_eq!(p.cursor_offset(), offset);
    }

    #[test]
    fn host_move_by_lines() {
        let mut p = pane(10);
        p.set_position(Position::new(5, 4));
        p.move_cursor_by_lines(3);
        assert_eq!(p.position().line, 8);
        p.move_cursor_by_lines(-8);
        assert_eq!(p.position().line, 0);
    }

    #[test]
    fn crlf_lines_bisect_and_wrap() {
        let mut p = Pane::new(Buffer::from_text("abcdefgh\r\nxy\r\n"), 10);
        let mut nav = Navigator::new();
        let mut log = CommandLog::new();

        p.set_position(Position::new(0, 8));
        assert_eq!(p.line_end(0), 8);
        nav.line_step_backward(&mut p, &log);
        log.record(NavCommand::LINE_BACKWARD);
        assert_eq!(p.position(), Position::new(0, 4));
        nav.line_step_forward(&mut p, &log);
        log.record(NavCommand::LINE_FORWARD);
        assert_eq!(p.position(), Position::new(0, 6));

        p.end_of_line();
        p.forward_char();
        log.record(CommandId::other("forward-char"));
        assert_eq!(p.position(), Position::new(1, 0));
        assert_eq!(p.offset(), 10);

        p.end_of_line();
        nav.line_step_backward(&mut p, &log);
        assert_eq!(p.position(), Position::new(1, 1));
        p.backward_char();
        p.backward_char();
        assert_eq!(p.position(), Position::new(0, 8));
    }

    // -- Plain motions ------------------------------------------------------

    #[test]
    fn char_motions_wrap() {
        let mut p = pane(10);
        p.set_position(Position::new(0, 14));
        p.forward_char();
        assert_eq!(p.position(), Position::new(1, 0));
        p.backward_char();
        assert_eq!(p.position(), Position::new(0, 14));
    }

    #[test]
    fn line_motions_keep_sticky_column() {
        let mut p = pane(10);
        p.set_position(Position::new(7, 6));
        p.next_line();
        p.next_line(); // through the empty line
        assert_eq!(p.position(), Position::new(9, 0));
        p.next_line();
        assert_eq!(p.position(), Position::new(10, 6));
        p.previous_line();
        assert_eq!(p.position(), Position::new(9, 0));
    }

    #[test]
    fn beginning_and_end_of_line() {
        let mut p = pane(10);
        p.set_position(Position::new(3, 5));
        p.end_of_line();
        assert_eq!(p.position(), Position::new(3, 14));
        p.beginning_of_line();
        assert_eq!(p.position(), Position::new(3, 0));
    }

    #[test]
    fn scroll_up_pages_and_drags_cursor() {
        let mut p = pane(10);
        p.scroll_up();
        assert_eq!(p.window().top_line(), 8);
        assert_eq!(p.position().line, 8);
        p.scroll_down();
        assert_eq!(p.window().top_line(), 0);
        // The cursor was still on screen, so it stays put.
        assert_eq!(p.position().line, 8);
    }

    #[test]
    fn scroll_to_pulls_cursor_up_from_below() {
        let mut p = pane(5);
        p.set_position(Position::new(30, 2));
        p.scroll_to(10);
        assert_eq!(p.position(), Position::new(14, 2));
    }
}
