//! The editor: key handling and command dispatch around one pane.
//!
//! [`Editor`] is the host-integration layer. It owns the [`CommandLog`] and
//! keeps it honest: every command that runs, whether it is a navigation
//! command, a plain motion, or an undefined key, is recorded after it
//! runs. That record is what lets repeated navigation keys chain.
//!
//! ```text
//! KeyEvent ─▶ handle_key ─┬─ chord tap ──────────────┐
//!                         ├─ keymap (prefix/binding) ┼─▶ dispatch ─▶ Navigator / Pane
//!                         └─ plain key table ────────┘        │
//!                                                             └─▶ log.record(cmd)
//! ```
//!
//! # Keys
//!
//! The keymap is consulted first, so configured navigation bindings win over
//! the built-in plain keys (`C-f`, `<down>`, ...). A multi-key binding waits
//! for its remaining keys; `C-g` cancels a half-typed sequence and leaves
//! the chord.

use std::mem;

use tracing::{debug, trace};

use halve_nav::config::Config;
use halve_nav::key::{KeyCode, KeyEvent, KeySequence, Modifiers};
use halve_nav::keymap::{Binding, Bindings, Chord, Keymap, Lookup};
use halve_nav::{CommandId, CommandLog, Error, Navigator, Result};

use crate::pane::Pane;

// ─── Plain commands ─────────────────────────────────────────────────────────

pub const FORWARD_CHAR: &str = "forward-char";
pub const BACKWARD_CHAR: &str = "backward-char";
pub const NEXT_LINE: &str = "next-line";
pub const PREVIOUS_LINE: &str = "previous-line";
pub const BEGINNING_OF_LINE: &str = "beginning-of-line";
pub const END_OF_LINE: &str = "end-of-line";
pub const SCROLL_UP: &str = "scroll-up";
pub const SCROLL_DOWN: &str = "scroll-down";
pub const KEYBOARD_QUIT: &str = "keyboard-quit";

/// Every non-navigation command [`Editor::dispatch`] understands.
pub const PLAIN_COMMANDS: [&str; 9] = [
    FORWARD_CHAR,
    BACKWARD_CHAR,
    NEXT_LINE,
    PREVIOUS_LINE,
    BEGINNING_OF_LINE,
    END_OF_LINE,
    SCROLL_UP,
    SCROLL_DOWN,
    KEYBOARD_QUIT,
];

/// Recorded when a key sequence has no binding.
pub const UNDEFINED: &str = "undefined";

/// The built-in single-key bindings for plain commands.
fn plain_command_for(key: &KeyEvent) -> Option<&'static str> {
    let ctrl = key.modifiers == Modifiers::CTRL;
    let bare = key.modifiers.is_empty();
    let name = match key.code {
        KeyCode::Char('f') if ctrl => FORWARD_CHAR,
        KeyCode::Char('b') if ctrl => BACKWARD_CHAR,
        KeyCode::Char('n') if ctrl => NEXT_LINE,
        KeyCode::Char('p') if ctrl => PREVIOUS_LINE,
        KeyCode::Char('a') if ctrl => BEGINNING_OF_LINE,
        KeyCode::Char('e') if ctrl => END_OF_LINE,
        KeyCode::Char('v') if ctrl => SCROLL_UP,
        KeyCode::Char('v') if key.modifiers == Modifiers::ALT => SCROLL_DOWN,
        KeyCode::Right if bare => FORWARD_CHAR,
        KeyCode::Left if bare => BACKWARD_CHAR,
        KeyCode::Down if bare => NEXT_LINE,
        KeyCode::Up if bare => PREVIOUS_LINE,
        KeyCode::Home if bare => BEGINNING_OF_LINE,
        KeyCode::End if bare => END_OF_LINE,
        KeyCode::PageDown if bare => SCROLL_UP,
        KeyCode::PageUp if bare => SCROLL_DOWN,
        _ => return None,
    };
    Some(name)
}

// ─── Key outcome ────────────────────────────────────────────────────────────

/// What a single key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The keys typed so far are the start of a binding.
    Pending,
    /// A command ran and was recorded.
    Ran(CommandId),
    /// The chord launcher was pressed; taps now run navigation commands.
    ChordEntered,
    /// Nothing is bound to these keys. Recorded as `undefined`.
    Unbound(KeySequence),
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// A pane plus everything needed to drive it from keys.
#[derive(Debug)]
pub struct Editor {
    pane: Pane,
    navigator: Navigator,
    log: CommandLog,

    /// Key sequences currently bound. Navigation registers into it.
    keymap: Keymap,
    bindings: Bindings,
    chord: Option<Chord>,

    /// Keys typed toward a multi-key binding.
    pending: Vec<KeyEvent>,
    /// True after the chord launcher, until a key that isn't a tap.
    chord_active: bool,
}

impl Editor {
    /// An editor on `pane` with the default bindings and chord. Navigation
    /// starts disabled; see [`enable_navigation`](Self::enable_navigation).
    #[must_use]
    pub fn new(pane: Pane) -> Self {
        Self {
            pane,
            navigator: Navigator::new(),
            log: CommandLog::new(),
            keymap: Keymap::new(),
            bindings: Bindings::default(),
            chord: Some(Chord::default()),
            pending: Vec::new(),
            chord_active: false,
        }
    }

    /// An editor using the bindings and chord from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the config names an unknown command or has bad key notation.
    pub fn with_config(pane: Pane, config: &Config) -> Result<Self> {
        let mut editor = Self::new(pane);
        editor.bindings = config.bindings()?;
        editor.chord = config.chord()?;
        Ok(editor)
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn pane(&self) -> &Pane {
        &self.pane
    }

    /// Mutable access to the pane, for placing the cursor or scrolling
    /// without going through a command.
    #[inline]
    pub const fn pane_mut(&mut self) -> &mut Pane {
        &mut self.pane
    }

    #[inline]
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[inline]
    #[must_use]
    pub const fn log(&self) -> &CommandLog {
        &self.log
    }

    #[inline]
    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[inline]
    #[must_use]
    pub const fn is_chord_active(&self) -> bool {
        self.chord_active
    }

    /// Keys typed so far toward a multi-key binding.
    #[must_use]
    pub fn pending_keys(&self) -> &[KeyEvent] {
        &self.pending
    }

    // -- Navigation lifecycle -----------------------------------------------

    /// Register the navigation bindings (and the chord launcher, if any) in
    /// the editor's keymap.
    ///
    /// # Errors
    ///
    /// Fails if a binding collides with something already in the keymap. The
    /// keymap is left unchanged in that case.
    pub fn enable_navigation(&mut self) -> Result<()> {
        self.navigator
            .activate(&mut self.keymap, &self.bindings, self.chord.as_ref())
    }

    /// Remove the navigation bindings again and forget all chain state.
    pub fn disable_navigation(&mut self) {
        self.navigator.deactivate(&mut self.keymap);
        self.pending.clear();
        self.chord_active = false;
    }

    // -- Dispatch -----------------------------------------------------------

    /// Run a command by identity, then record it as the last command.
    ///
    /// Navigation commands run whether or not navigation is enabled; enabling
    /// only concerns key bindings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] for a name that is neither a
    /// navigation command nor in [`PLAIN_COMMANDS`]. Nothing is recorded then.
    pub fn dispatch(&mut self, command: CommandId) -> Result<()> {
        match &command {
            CommandId::Nav(cmd) => {
                let target = self.navigator.run(*cmd, &mut self.pane, &self.log);
                trace!(command = %cmd, target, "dispatch");
            }
            CommandId::Other(name) => self.run_plain(name)?,
        }
        self.log.record(command);
        Ok(())
    }

    /// Run a command by name (`"line-step-forward"`, `"next-line"`, ...).
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub fn dispatch_name(&mut self, name: &str) -> Result<()> {
        let command: CommandId = match name.parse() {
            Ok(command) => command,
            Err(never) => match never {},
        };
        self.dispatch(command)
    }

    fn run_plain(&mut self, name: &str) -> Result<()> {
        match name {
            FORWARD_CHAR => self.pane.forward_char(),
            BACKWARD_CHAR => self.pane.backward_char(),
            NEXT_LINE => self.pane.next_line(),
            PREVIOUS_LINE => self.pane.previous_line(),
            BEGINNING_OF_LINE => self.pane.beginning_of_line(),
            END_OF_LINE => self.pane.end_of_line(),
            SCROLL_UP => self.pane.scroll_up(),
            SCROLL_DOWN => self.pane.scroll_down(),
            KEYBOARD_QUIT => {
                self.pending.clear();
                self.chord_active = false;
            }
            other => return Err(Error::UnknownCommand(other.to_string())),
        }
        trace!(command = name, "dispatch");
        Ok(())
    }

    /// Dispatch a command that is known to exist.
    fn run(&mut self, command: CommandId) -> KeyOutcome {
        if let Err(e) = self.dispatch(command.clone()) {
            // Only reachable for a plain name missing from `run_plain`.
            debug!(error = %e, "command failed");
        }
        KeyOutcome::Ran(command)
    }

    // -- Keys ---------------------------------------------------------------

    /// Feed one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key == KeyEvent::ctrl('g') {
            return self.run(CommandId::other(KEYBOARD_QUIT));
        }

        if self.chord_active {
            if let Some(cmd) = self.chord.as_ref().and_then(|c| c.tap(&key)) {
                return self.run(cmd.into());
            }
            self.chord_active = false;
            debug!(%key, "chord exit");
        }

        self.pending.push(key);
        match self.keymap.lookup(&self.pending) {
            Lookup::Prefix => KeyOutcome::Pending,
            Lookup::Bound(binding) => {
                self.pending.clear();
                match binding {
                    Binding::Command(cmd) => self.run(cmd.into()),
                    Binding::ChordLauncher => {
                        self.chord_active = self.chord.is_some();
                        debug!(
                            taps = self.chord.as_ref().map_or(0, Chord::tap_count),
                            "chord enter"
                        );
                        KeyOutcome::ChordEntered
                    }
                }
            }
            Lookup::Unbound => {
                let keys = KeySequence::new(mem::take(&mut self.pending));
                if keys.len() == 1 {
                    if let Some(name) = plain_command_for(&key) {
                        return self.run(CommandId::other(name));
                    }
                }
                debug!(%keys, "undefined key");
                self.log.record(CommandId::other(UNDEFINED));
                KeyOutcome::Unbound(keys)
            }
        }
    }

    /// Feed every key of a sequence, returning each outcome.
    pub fn handle_keys(&mut self, keys: &KeySequence) -> Vec<KeyOutcome> {
        keys.keys().iter().map(|key| self.handle_key(*key)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
