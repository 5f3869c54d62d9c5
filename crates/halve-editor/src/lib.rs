//! # halve-editor: a small editor host for halve
//!
//! Just enough editor to drive [`halve_nav`] end to end:
//!
//! - **[`position`]**: `Position` (line, col), 0-indexed
//! - **[`buffer`]**: `Buffer` wrapping a rope, with offset/line conversion
//! - **[`cursor`]**: `Cursor` with plain motions and a sticky column
//! - **[`window`]**: `Window`, the visible slice of the buffer
//! - **[`pane`]**: `Pane`, buffer + cursor + window, implementing `Host`
//! - **[`editor`]**: `Editor`, key handling, command dispatch and the command log

pub mod buffer;
pub mod cursor;
pub mod editor;
pub mod pane;
pub mod position;
pub mod window;

pub use editor::{Editor, KeyOutcome};
pub use pane::Pane;
