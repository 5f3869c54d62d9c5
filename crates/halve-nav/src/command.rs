//! Command identities and the command-chain detector.
//!
//! Every navigation call has to answer one question before it does anything
//! else: *is this a continuation of the previous call, or a fresh start?*
//! The answer depends only on what the host dispatched immediately before.
//!
//! - **[`Scope`]**: Line, Window, or Buffer. A scope doubles as a command
//!   *family*: its two commands continue each other's chain, nothing else
//!   does.
//! - **[`NavCommand`]**: one of the six exposed operations (scope ×
//!   direction).
//! - **[`CommandId`]**: the identity of *any* dispatched command, navigation
//!   or otherwise.
//! - **[`CommandLog`]**: the single record of the last dispatched command.
//!   The host owns it and passes it by reference into every navigation call;
//!   nothing here is a hidden global.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// The bounded index domain one bisector operates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Character offsets within the current line.
    Line,
    /// Line numbers of the lines visible in the window.
    Window,
    /// Line numbers of the whole buffer.
    Buffer,
}

impl Scope {
    /// All three scopes, in a stable order.
    pub const ALL: [Self; 3] = [Self::Line, Self::Window, Self::Buffer];

    /// Lowercase name used in command names and log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Window => "window",
            Self::Buffer => "buffer",
        }
    }

    /// True for the scopes whose index is a line number. These move the
    /// cursor vertically and carry a column cache.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Window | Self::Buffer)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which end of the interval a step moves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the low end (start of line, top of window, top of buffer).
    Backward,
    /// Toward the high end.
    Forward,
}

impl Direction {
    /// Lowercase name used in command names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backward => "backward",
            Self::Forward => "forward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// NavCommand
// ---------------------------------------------------------------------------

/// One of the six navigation operations a host can bind to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavCommand {
    pub scope: Scope,
    pub direction: Direction,
}

impl NavCommand {
    pub const LINE_BACKWARD: Self = Self::new(Scope::Line, Direction::Backward);
    pub const LINE_FORWARD: Self = Self::new(Scope::Line, Direction::Forward);
    pub const WINDOW_BACKWARD: Self = Self::new(Scope::Window, Direction::Backward);
    pub const WINDOW_FORWARD: Self = Self::new(Scope::Window, Direction::Forward);
    pub const BUFFER_BACKWARD: Self = Self::new(Scope::Buffer, Direction::Backward);
    pub const BUFFER_FORWARD: Self = Self::new(Scope::Buffer, Direction::Forward);

    /// The six commands, grouped by family.
    pub const ALL: [Self; 6] = [
        Self::LINE_BACKWARD,
        Self::LINE_FORWARD,
        Self::WINDOW_BACKWARD,
        Self::WINDOW_FORWARD,
        Self::BUFFER_BACKWARD,
        Self::BUFFER_FORWARD,
    ];

    #[inline]
    #[must_use]
    pub const fn new(scope: Scope, direction: Direction) -> Self {
        Self { scope, direction }
    }

    /// Stable kebab-case name, e.g. `window-step-forward`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match (self.scope, self.direction) {
            (Scope::Line, Direction::Backward) => "line-step-backward",
            (Scope::Line, Direction::Forward) => "line-step-forward",
            (Scope::Window, Direction::Backward) => "window-step-backward",
            (Scope::Window, Direction::Forward) => "window-step-forward",
            (Scope::Buffer, Direction::Backward) => "buffer-step-backward",
            (Scope::Buffer, Direction::Forward) => "buffer-step-forward",
        }
    }
}

impl fmt::Display for NavCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NavCommand {
    type Err = Error;

    /// Accepts the kebab-case name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == normalized)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// CommandId
// ---------------------------------------------------------------------------

/// Identity of any command the host dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// One of the six navigation commands.
    Nav(NavCommand),
    /// Anything else, named by the host (`forward-char`, `scroll-up`, ...).
    Other(Cow<'static, str>),
}

impl CommandId {
    /// A non-navigation command with a static name.
    #[must_use]
    pub const fn other(name: &'static str) -> Self {
        Self::Other(Cow::Borrowed(name))
    }

    /// The navigation command, if this is one.
    #[must_use]
    pub const fn as_nav(&self) -> Option<NavCommand> {
        match self {
            Self::Nav(cmd) => Some(*cmd),
            Self::Other(_) => None,
        }
    }

    /// True when this is one of `scope`'s two commands.
    #[must_use]
    pub fn in_family(&self, scope: Scope) -> bool {
        self.as_nav().is_some_and(|cmd| cmd.scope == scope)
    }

    /// Command name, as the host would show it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Nav(cmd) => cmd.name(),
            Self::Other(name) => name,
        }
    }
}

impl From<NavCommand> for CommandId {
    fn from(cmd: NavCommand) -> Self {
        Self::Nav(cmd)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandId {
    type Err = std::convert::Infallible;

    /// Navigation names resolve to [`CommandId::Nav`]; any other name is kept
    /// verbatim as [`CommandId::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<NavCommand>().map_or_else(
            |_| Self::Other(Cow::Owned(s.trim().to_string())),
            Self::Nav,
        ))
    }
}

// ---------------------------------------------------------------------------
// CommandLog
// ---------------------------------------------------------------------------

/// The record of the last command the host dispatched.
///
/// The host updates it after every dispatch (navigation or not). Navigation
/// operations only read it. One log is shared by all three scopes; each scope
/// asks [`continues`](Self::continues) about its own family only, so an
/// interleaved command from another family breaks the chain just like a plain
/// cursor motion would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    last: Option<CommandId>,
}

impl CommandLog {
    /// A log with nothing dispatched yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// The immediately preceding command, if any.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> Option<&CommandId> {
        self.last.as_ref()
    }

    /// Record `command` as the new "last command". Called by the host after
    /// every dispatch.
    pub fn record(&mut self, command: impl Into<CommandId>) {
        self.last = Some(command.into());
    }

    /// Forget the last command. The next navigation call of every family
    /// starts fresh.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// True iff the last command belongs to `scope`'s family.
    #[must_use]
    pub fn continues(&self, scope: Scope) -> bool {
        self.last.as_ref().is_some_and(|id| id.in_family(scope))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
