//! The bisection state machine.
//!
//! One [`Bisector`] runs per scope. Each call to [`Bisector::step`] either
//! **starts** a chain or **continues** one, and the only thing that decides
//! which is the [`CommandLog`]. The bisector has no timer and no idea of
//! "recent". If the last command the host dispatched was one of this scope's
//! two commands, the call continues. Anything else starts fresh.
//!
//! # Starting
//!
//! The interval is rebuilt from the scope's natural boundaries and the cursor:
//!
//! - backward: `[range.low, cursor]`
//! - forward:  `[cursor, range.high]`
//!
//! Vertical scopes also capture the cursor's column at this moment.
//!
//! # Continuing
//!
//! The boundaries are *not* re-read. The side of the existing interval in
//! the step's direction collapses onto the cursor, which sits on the
//! previous step's midpoint:
//!
//! - backward: keep `low`, `high := cursor`
//! - forward:  keep `high`, `low := cursor`
//!
//! Repeating one direction digs deeper on that side. Alternating walks back
//! and forth by halves. On a line spanning `[0, 45]` with the cursor at 34,
//! the sequence backward, forward, backward, backward visits
//! 17, 25, 21, 19.
//!
//! In every case the cursor lands on `floor((low + high) / 2)`.

use tracing::{debug, trace};

use crate::column::ColumnCache;
use crate::command::{CommandLog, Direction, Scope};
use crate::host::Host;
use crate::interval::Interval;

// ---------------------------------------------------------------------------
// NavigationState
// ---------------------------------------------------------------------------

/// The interval and the direction of the most recent step.
///
/// Uninitialized (`interval == None`) until the first step of a session.
/// A fresh start overwrites the interval completely, so stale values from an
/// interrupted chain can never leak into a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    interval: Option<Interval>,
    last_direction: Option<Direction>,
}

impl NavigationState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            last_direction: None,
        }
    }

    /// The interval of the last step, if any.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Option<Interval> {
        self.interval
    }

    /// The direction of the last step, if any.
    #[inline]
    #[must_use]
    pub const fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// True once a step has initialized the interval.
    #[inline]
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.interval.is_some()
    }

    /// Back to uninitialized.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start a chain from the scope's natural `range` and the `current`
    /// index. Returns the midpoint to move to.
    pub const fn start(&mut self, direction: Direction, current: usize, range: Interval) -> usize {
        let interval = match direction {
            Direction::Backward => Interval::ordered(range.low(), current),
            Direction::Forward => Interval::ordered(current, range.high()),
        };
        self.commit(direction, interval)
    }

    /// Continue a chain: collapse one side of the existing interval onto
    /// `current`. Returns `None` if no chain was ever started.
    pub const fn advance(&mut self, direction: Direction, current: usize) -> Option<usize> {
        let Some(previous) = self.interval else {
            return None;
        };
        let interval = match direction {
            Direction::Backward => previous.with_high(current),
            Direction::Forward => previous.with_low(current),
        };
        Some(self.commit(direction, interval))
    }

    const fn commit(&mut self, direction: Direction, interval: Interval) -> usize {
        self.interval = Some(interval);
        self.last_direction = Some(direction);
        interval.midpoint()
    }
}

// ---------------------------------------------------------------------------
// Bisector
// ---------------------------------------------------------------------------

/// Bisection state for one scope: the interval plus, for vertical scopes,
/// the column cache.
#[derive(Debug, Clone)]
pub struct Bisector {
    scope: Scope,
    state: NavigationState,
    column: ColumnCache,
}

impl Bisector {
    #[must_use]
    pub const fn new(scope: Scope) -> Self {
        Self {
            scope,
            state: NavigationState::new(),
            column: ColumnCache::new(),
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub const fn column(&self) -> &ColumnCache {
        &self.column
    }

    /// Drop all chain state.
    pub const fn reset(&mut self) {
        self.state.reset();
        self.column.clear();
    }

    // -- Stepping -----------------------------------------------------------

    /// Take one bisection step toward `direction`, move the host's cursor to
    /// the new midpoint, and return it.
    ///
    /// `log` must still hold the command dispatched *before* this one. The
    /// host records this step after the call returns.
    pub fn step<H: Host + ?Sized>(
        &mut self,
        direction: Direction,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        let current = self.scope.current_index(host);

        let continued = if log.continues(self.scope) {
            self.state.advance(direction, current)
        } else {
            None
        };

        let target = if let Some(target) = continued {
            trace!(
                scope = %self.scope,
                %direction,
                interval = ?self.state.interval,
                width = self.state.interval.map_or(0, Interval::width),
                target,
                "bisect continue"
            );
            target
        } else {
            // Fresh start, or the log claims a chain we never began.
            if self.scope.is_vertical() {
                self.column.capture(host);
            }
            let range = self.scope.range(host);
            let target = self.state.start(direction, current, range);
            debug!(
                scope = %self.scope,
                %direction,
                %range,
                width = range.width(),
                current,
                target,
                "bisect start"
            );
            target
        };

        debug_assert!(self.state.interval.is_some_and(|iv| iv.contains(target)));
        self.scope.move_to(host, target, &self.column);
        target
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
