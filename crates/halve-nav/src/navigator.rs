//! The navigator: three bisectors behind six commands.
//!
//! [`Navigator`] is what a host talks to. It owns one [`Bisector`] per scope
//! and exposes the six operations as methods. Each takes the host and the
//! host's [`CommandLog`]:
//!
//! ```text
//! key press → host dispatch → navigator.run(cmd, host, &log)
//!                                 │ log.continues(scope)?
//!                                 │ bisector.step(...)
//!                                 └ scope.move_to(...)
//!           ← host records cmd in log
//! ```
//!
//! Scopes never share state: a window step neither reads nor disturbs the
//! line bisector's interval. It only breaks the line chain because the log
//! now names a window command.
//!
//! # Lifecycle
//!
//! Like an editor minor mode, the navigator can be switched on and off.
//! [`activate`](Navigator::activate) registers the commands into a
//! [`BindingsTarget`] and [`deactivate`](Navigator::deactivate) removes them
//! again. Nothing else is touched.

use tracing::info;

use crate::bisect::Bisector;
use crate::command::{CommandLog, Direction, NavCommand, Scope};
use crate::error::Result;
use crate::host::Host;
use crate::key::KeySequence;
use crate::keymap::{Binding, Bindings, BindingsTarget, Chord};

/// Bisection navigation for all three scopes.
#[derive(Debug, Clone)]
pub struct Navigator {
    line: Bisector,
    window: Bisector,
    buffer: Bisector,
    /// Sequences registered by the last `activate`, for `deactivate`.
    registered: Vec<KeySequence>,
    active: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// A navigator with every scope uninitialized.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: Bisector::new(Scope::Line),
            window: Bisector::new(Scope::Window),
            buffer: Bisector::new(Scope::Buffer),
            registered: Vec::new(),
            active: false,
        }
    }

    /// The bisector for `scope`.
    #[must_use]
    pub const fn bisector(&self, scope: Scope) -> &Bisector {
        match scope {
            Scope::Line => &self.line,
            Scope::Window => &self.window,
            Scope::Buffer => &self.buffer,
        }
    }

    const fn bisector_mut(&mut self, scope: Scope) -> &mut Bisector {
        match scope {
            Scope::Line => &mut self.line,
            Scope::Window => &mut self.window,
            Scope::Buffer => &mut self.buffer,
        }
    }

    // -- Commands -----------------------------------------------------------

    /// Run any of the six commands. Returns the index the cursor moved to.
    pub fn run<H: Host + ?Sized>(
        &mut self,
        command: NavCommand,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.bisector_mut(command.scope)
            .step(command.direction, host, log)
    }

    /// Bisect toward the start of the current line.
    pub fn line_step_backward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::LINE_BACKWARD, host, log)
    }

    /// Bisect toward the end of the current line.
    pub fn line_step_forward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::LINE_FORWARD, host, log)
    }

    /// Bisect toward the first visible line.
    pub fn window_step_backward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::WINDOW_BACKWARD, host, log)
    }

    /// Bisect toward the last visible line.
    pub fn window_step_forward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::WINDOW_FORWARD, host, log)
    }

    /// Bisect toward the first line of the buffer.
    pub fn buffer_step_backward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::BUFFER_BACKWARD, host, log)
    }

    /// Bisect toward the last line of the buffer.
    pub fn buffer_step_forward<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::BUFFER_FORWARD, host, log)
    }

    /// Shorthand for [`run`](Self::run) by scope and direction.
    pub fn step<H: Host + ?Sized>(
        &mut self,
        scope: Scope,
        direction: Direction,
        host: &mut H,
        log: &CommandLog,
    ) -> usize {
        self.run(NavCommand::new(scope, direction), host, log)
    }

    /// Drop the chain state of every scope.
    pub const fn reset(&mut self) {
        self.line.reset();
        self.window.reset();
        self.buffer.reset();
    }

    // -- Lifecycle ----------------------------------------------------------

    /// True between [`activate`](Self::activate) and
    /// [`deactivate`](Self::deactivate).
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Register the navigation commands into `target` under `bindings`, plus
    /// the chord launcher if `chord` is given. Calling it again while active
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Fails if `target` rejects a binding. Whatever was registered before
    /// the failure is removed again, so the target is left as it was.
    pub fn activate<T: BindingsTarget + ?Sized>(
        &mut self,
        target: &mut T,
        bindings: &Bindings,
        chord: Option<&Chord>,
    ) -> Result<()> {
        if self.active {
            return Ok(());
        }

        let mut entries: Vec<(KeySequence, Binding)> = bindings
            .iter()
            .map(|(cmd, keys)| (keys.clone(), Binding::Command(cmd)))
            .collect();
        if let Some(chord) = chord {
            entries.push((chord.launcher().clone(), Binding::ChordLauncher));
        }

        for (keys, binding) in entries {
            if let Err(e) = target.bind(keys.clone(), binding) {
                for done in self.registered.drain(..) {
                    target.unbind(&done);
                }
                return Err(e);
            }
            self.registered.push(keys);
        }

        self.active = true;
        info!(bindings = self.registered.len(), "bisection navigation enabled");
        Ok(())
    }

    /// Unregister everything [`activate`](Self::activate) added and reset all
    /// scopes. Calling it while inactive does nothing.
    pub fn deactivate<T: BindingsTarget + ?Sized>(&mut self, target: &mut T) {
        if !self.active {
            return;
        }
        for keys in self.registered.drain(..) {
            target.unbind(&keys);
        }
        self.reset();
        self.active = false;
        info!("bisection navigation disabled");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandId;
    use crate::host::fake::FakeHost;
    use crate::interval::Interval;
    use crate::key::KeyEvent;
    use crate::keymap::{Keymap, Lookup};

    fn text() -> String {
        let mut lines: Vec<String> = (1..=20).map(|i| format!("row {i:02} of the text")).collect();
        lines[0] = "x".repeat(45);
        lines.join("\n")
    }

    /// Run a command and record it, like a host would.
    fn dispatch(
        nav: &mut Navigator,
        host: &mut FakeHost,
        log: &mut CommandLog,
        cmd: NavCommand,
    ) -> usize {
        let target = nav.run(cmd, host, log);
        log.record(cmd);
        target
    }

    // -- Commands -----------------------------------------------------------

    #[test]
    fn six_named_methods_match_run() {
        let log = CommandLog::new();
        let t = text();

        let mut a = FakeHost::new(&t).at(5, 3).with_window(2, 12);
        let mut b = a.clone();
        let mut n1 = Navigator::new();
        let mut n2 = Navigator::new();

        let pairs: [(fn(&mut Navigator, &mut FakeHost, &CommandLog) -> usize, NavCommand); 6] = [
            (Navigator::line_step_backward, NavCommand::LINE_BACKWARD),
            (Navigator::line_step_forward, NavCommand::LINE_FORWARD),
            (Navigator::window_step_backward, NavCommand::WINDOW_BACKWARD),
            (Navigator::window_step_forward, NavCommand::WINDOW_FORWARD),
            (Navigator::buffer_step_backward, NavCommand::BUFFER_BACKWARD),
            (Navigator::buffer_step_forward, NavCommand::BUFFER_FORWARD),
        ];
        for (method, cmd) in pairs {
            assert_eq!(method(&mut n1, &mut a, &log), n2.run(cmd, &mut b, &log), "{cmd}");
        }
        assert_eq!(a.cursor, b.cursor);
    }

    #[test]
    fn line_chain_example() {
        let t = text();
        let mut host = FakeHost::new(&t).at(1, 34);
        let mut log = CommandLog::new();
        let mut nav = Navigator::new();

        for cmd in [
            NavCommand::LINE_BACKWARD,
            NavCommand::LINE_FORWARD,
            NavCommand::LINE_BACKWARD,
            NavCommand::LINE_BACKWARD,
        ] {
            dispatch(&mut nav, &mut host, &mut log, cmd);
        }
        assert_eq!(host.cursor, 19);
    }

    #[test]
    fn scopes_are_independent() {
        let t = text();
        let mut host = FakeHost::new(&t).at(1, 34).with_window(1, 20);
        let mut log = CommandLog::new();
        let mut nav = Navigator::new();

        dispatch(&mut nav, &mut host, &mut log, NavCommand::LINE_BACKWARD);
        let line_state = *nav.bisector(Scope::Line).state();

        dispatch(&mut nav, &mut host, &mut log, NavCommand::WINDOW_FORWARD);
        // The window step didn't touch the line bisector.
        assert_eq!(*nav.bisector(Scope::Line).state(), line_state);
        let window_state = *nav.bisector(Scope::Window).state();

        dispatch(&mut nav, &mut host, &mut log, NavCommand::LINE_FORWARD);
        assert_eq!(*nav.bisector(Scope::Window).state(), window_state);

        // The line chain was broken by the window command: fresh start from
        // the cursor to end of line, not from the stale [0, 34].
        let iv = nav.bisector(Scope::Line).state().interval().unwrap();
        assert_ne!(iv, Interval::ordered(17, 34));
        assert_eq!(iv.high(), host.line_end(host.cursor));
    }

    #[test]
    fn window_chain_survives_only_own_family() {
        let t = text();
        let mut host = FakeHost::new(&t).at(3, 0).with_window(3, 19);
        let mut log = CommandLog::new();
        let mut nav = Navigator::new();

        assert_eq!(dispatch(&mut nav, &mut host, &mut log, NavCommand::WINDOW_FORWARD), 11);
        assert_eq!(dispatch(&mut nav, &mut host, &mut log, NavCommand::WINDOW_BACKWARD), 7);

        log.record(CommandId::other("next-line"));
        host.move_cursor_by_lines(1);
        // Fresh: [8, 19] → 13
        assert_eq!(dispatch(&mut nav, &mut host, &mut log, NavCommand::WINDOW_FORWARD), 13);
    }

    #[test]
    fn reset_uninitializes_all() {
        let t = text();
        let mut host = FakeHost::new(&t).at(4, 4);
        let mut log = CommandLog::new();
        let mut nav = Navigator::new();
        for cmd in NavCommand::ALL {
            dispatch(&mut nav, &mut host, &mut log, cmd);
        }
        nav.reset();
        for scope in Scope::ALL {
            assert!(!nav.bisector(scope).state().is_initialized());
        }
    }

    // -- Lifecycle ----------------------------------------------------------

    #[test]
    fn activate_registers_bindings_and_chord() {
        let mut km = Keymap::new();
        let mut nav = Navigator::new();
        nav.activate(&mut km, &Bindings::default(), Some(&Chord::default()))
            .unwrap();

        assert!(nav.is_active());
        assert_eq!(km.len(), 7);
        assert_eq!(
            km.lookup(&[KeyEvent::ctrl('c'), KeyEvent::char(']')]),
            Lookup::Bound(Binding::Command(NavCommand::BUFFER_FORWARD))
        );
    }

    #[test]
    fn activate_is_idempotent() {
        let mut km = Keymap::new();
        let mut nav = Navigator::new();
        nav.activate(&mut km, &Bindings::default(), None).unwrap();
        nav.activate(&mut km, &Bindings::default(), None).unwrap();
        assert_eq!(km.len(), 6);
    }

    #[test]
    fn deactivate_unregisters_and_resets() {
        let t = text();
        let mut host = FakeHost::new(&t).at(2, 2);
        let log = CommandLog::new();
        let mut km = Keymap::new();
        let mut nav = Navigator::new();

        nav.activate(&mut km, &Bindings::default(), Some(&Chord::default()))
            .unwrap();
        nav.buffer_step_forward(&mut host, &log);
        nav.deactivate(&mut km);

        assert!(!nav.is_active());
        assert!(km.is_empty());
        assert!(!nav.bisector(Scope::Buffer).state().is_initialized());

        // Deactivating twice is harmless.
        nav.deactivate(&mut km);
    }

    #[test]
    fn deactivate_leaves_foreign_bindings() {
        let mut km = Keymap::new();
        let foreign = KeySequence::parse("C-x C-s").unwrap();
        km.bind(foreign.clone(), Binding::ChordLauncher).unwrap();

        let mut nav = Navigator::new();
        nav.activate(&mut km, &Bindings::default(), None).unwrap();
        nav.deactivate(&mut km);
        assert_eq!(km.len(), 1);
        assert_eq!(km.get(&foreign), Some(Binding::ChordLauncher));
    }

    #[test]
    fn failed_activation_rolls_back() {
        let mut km = Keymap::new();
        // Occupy the window-forward key with something else.
        km.bind(
            KeySequence::parse("C-c >").unwrap(),
            Binding::Command(NavCommand::LINE_FORWARD),
        )
        .unwrap();

        let mut nav = Navigator::new();
        let result = nav.activate(&mut km, &Bindings::default(), None);
        assert!(result.is_err());
        assert!(!nav.is_active());
        assert_eq!(km.len(), 1);
    }
}
