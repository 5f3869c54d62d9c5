//! # halve-nav: Bisection navigation core for halve
//!
//! Reach any position in a line, a window, or a buffer in at most
//! `ceil(log2 N)` keystrokes. Two commands per scope repeatedly halve an
//! interval toward the target:
//!
//! - **[`interval`]**: `Interval { low, high }`, always ordered, with the midpoint
//! - **[`command`]**: scopes, the six commands, and the `CommandLog` chain detector
//! - **[`column`]**: the column cache for vertical scopes
//! - **[`host`]**: the `Host` trait: what an editor must provide
//! - **[`scope`]**: scope adapters mapping indices onto the host
//! - **[`bisect`]**: the per-scope state machine
//! - **[`navigator`]**: the controller with the six operations and activation lifecycle
//! - **[`key`]** / **[`keymap`]**: Emacs-style key notation, keymaps, the chord launcher
//! - **[`config`]**: TOML configuration for bindings and the chord
//!
//! The crate never reads input or draws anything. A host (see `halve-editor`)
//! implements [`Host`], keeps a [`CommandLog`], and calls into a [`Navigator`].

pub mod bisect;
pub mod column;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod interval;
pub mod key;
pub mod keymap;
pub mod navigator;
pub mod scope;

pub use command::{CommandId, CommandLog, Direction, NavCommand, Scope};
pub use error::{Error, Result};
pub use host::Host;
pub use interval::Interval;
pub use navigator::Navigator;
