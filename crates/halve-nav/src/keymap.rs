//! Keymaps, default bindings, and the chord launcher.
//!
//! The navigation core does not read keys itself. A host owns some
//! [`BindingsTarget`] (its global keymap, a minor-mode map, ...), and the
//! [`Navigator`](crate::navigator::Navigator) registers the six commands into
//! it on activation and removes them on deactivation.
//!
//! [`Keymap`] is a ready-made target. It maps key sequences to [`Binding`]s
//! and resolves multi-key prefixes (`C-c` waiting for `,`).
//!
//! # Chord launcher
//!
//! Typing `C-c ,` over and over gets old. The [`Chord`] launcher (default
//! `C-c n`) enters a transient mode where single taps run navigation commands:
//!
//! | Tap | Command                |
//! |-----|------------------------|
//! | `h` | `line-step-backward`   |
//! | `l` | `line-step-forward`    |
//! | `k` | `window-step-backward` |
//! | `j` | `window-step-forward`  |
//! | `K` | `buffer-step-backward` |
//! | `J` | `buffer-step-forward`  |
//!
//! Any other key leaves the chord and goes back to the host unhandled.

use std::collections::HashMap;

use crate::command::NavCommand;
use crate::error::{Error, Result};
use crate::key::{KeyEvent, KeySequence};

// ---------------------------------------------------------------------------
// Binding targets
// ---------------------------------------------------------------------------

/// What a key sequence can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// One of the six navigation commands.
    Command(NavCommand),
    /// Enter the chord launcher.
    ChordLauncher,
}

impl Binding {
    /// Name for messages: the command name, or `chord-launcher`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Command(cmd) => cmd.name(),
            Self::ChordLauncher => "chord-launcher",
        }
    }
}

/// Anything navigation commands can be registered into.
pub trait BindingsTarget {
    /// Bind `keys` to `binding`.
    ///
    /// # Errors
    ///
    /// Implementations reject sequences that collide with existing bindings.
    fn bind(&mut self, keys: KeySequence, binding: Binding) -> Result<()>;

    /// Remove whatever is bound to `keys`. Unknown sequences are ignored.
    fn unbind(&mut self, keys: &KeySequence);
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// Result of looking up keys typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The keys form a complete binding.
    Bound(Binding),
    /// The keys are a prefix of at least one binding; wait for more.
    Prefix,
    /// Nothing starts with these keys.
    Unbound,
}

/// A prefix-aware map from key sequences to bindings.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeySequence, Binding>,
}

impl Keymap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Number of bound sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The binding for exactly `keys`, if any.
    #[must_use]
    pub fn get(&self, keys: &KeySequence) -> Option<Binding> {
        self.bindings.get(keys).copied()
    }

    /// The key sequence currently bound to `binding`, if any.
    #[must_use]
    pub fn keys_for(&self, binding: Binding) -> Option<&KeySequence> {
        self.bindings
            .iter()
            .find_map(|(keys, b)| (*b == binding).then_some(keys))
    }

    /// Resolve the keys typed so far.
    #[must_use]
    pub fn lookup(&self, keys: &[KeyEvent]) -> Lookup {
        if keys.is_empty() {
            return Lookup::Unbound;
        }
        let mut prefix = false;
        for (seq, binding) in &self.bindings {
            if seq.keys() == keys {
                return Lookup::Bound(*binding);
            }
            prefix |= seq.has_prefix(keys);
        }
        if prefix { Lookup::Prefix } else { Lookup::Unbound }
    }
}

impl BindingsTarget for Keymap {
    fn bind(&mut self, keys: KeySequence, binding: Binding) -> Result<()> {
        if let Some(existing) = self.bindings.get(&keys) {
            if *existing == binding {
                return Ok(());
            }
            return Err(Error::DuplicateBinding {
                keys: keys.to_string(),
                first: existing.name().to_string(),
                second: binding.name().to_string(),
            });
        }
        for seq in self.bindings.keys() {
            if seq.has_prefix(keys.keys()) {
                return Err(Error::PrefixConflict {
                    prefix: keys.to_string(),
                    keys: seq.to_string(),
                });
            }
            if keys.has_prefix(seq.keys()) {
                return Err(Error::PrefixConflict {
                    prefix: seq.to_string(),
                    keys: keys.to_string(),
                });
            }
        }
        self.bindings.insert(keys, binding);
        Ok(())
    }

    fn unbind(&mut self, keys: &KeySequence) {
        self.bindings.remove(keys);
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// Which key sequence each navigation command is registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(NavCommand, KeySequence)>,
}

impl Bindings {
    /// No bindings at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set (or replace) the key sequence for `command`.
    pub fn set(&mut self, command: NavCommand, keys: KeySequence) {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == command) {
            entry.1 = keys;
        } else {
            self.entries.push((command, keys));
        }
    }

    /// Remove the binding for `command`.
    pub fn remove(&mut self, command: NavCommand) {
        self.entries.retain(|(c, _)| *c != command);
    }

    /// The key sequence for `command`.
    #[must_use]
    pub fn get(&self, command: NavCommand) -> Option<&KeySequence> {
        self.entries
            .iter()
            .find_map(|(c, keys)| (*c == command).then_some(keys))
    }

    /// All `(command, keys)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NavCommand, &KeySequence)> {
        self.entries.iter().map(|(c, keys)| (*c, keys))
    }
}

impl Default for Bindings {
    /// Line on `C-c ,` / `C-c .`, window on `C-c <` / `C-c >`, buffer on
    /// `C-c [` / `C-c ]`.
    fn default() -> Self {
        let pairs = [
            (NavCommand::LINE_BACKWARD, ','),
            (NavCommand::LINE_FORWARD, '.'),
            (NavCommand::WINDOW_BACKWARD, '<'),
            (NavCommand::WINDOW_FORWARD, '>'),
            (NavCommand::BUFFER_BACKWARD, '['),
            (NavCommand::BUFFER_FORWARD, ']'),
        ];
        Self {
            entries: pairs
                .into_iter()
                .map(|(cmd, ch)| {
                    (
                        cmd,
                        KeySequence::new(vec![KeyEvent::ctrl('c'), KeyEvent::char(ch)]),
                    )
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chord
// ---------------------------------------------------------------------------

/// The chord launcher: a key that enters a transient mode, and the single
/// taps that run commands while it's active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    launcher: KeySequence,
    taps: HashMap<KeyEvent, NavCommand>,
}

impl Chord {
    /// A chord with no taps.
    #[must_use]
    pub fn new(launcher: KeySequence) -> Self {
        Self {
            launcher,
            taps: HashMap::new(),
        }
    }

    /// The key sequence that enters the chord.
    #[inline]
    #[must_use]
    pub const fn launcher(&self) -> &KeySequence {
        &self.launcher
    }

    /// Add a tap. Replaces any command already on `key`.
    pub fn add_tap(&mut self, key: KeyEvent, command: NavCommand) {
        self.taps.insert(key, command);
    }

    /// The command for a tap while the chord is active. `None` means the
    /// chord should exit.
    #[must_use]
    pub fn tap(&self, key: &KeyEvent) -> Option<NavCommand> {
        self.taps.get(key).copied()
    }

    /// Number of taps.
    #[must_use]
    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }
}

impl Chord {
    /// A chord on `launcher` with the standard `h l k j K J` taps.
    #[must_use]
    pub fn with_default_taps(launcher: KeySequence) -> Self {
        let mut chord = Self::new(launcher);
        for (ch, cmd) in [
            ('h', NavCommand::LINE_BACKWARD),
            ('l', NavCommand::LINE_FORWARD),
            ('k', NavCommand::WINDOW_BACKWARD),
            ('j', NavCommand::WINDOW_FORWARD),
            ('K', NavCommand::BUFFER_BACKWARD),
            ('J', NavCommand::BUFFER_FORWARD),
        ] {
            chord.add_tap(KeyEvent::char(ch), cmd);
        }
        chord
    }
}

impl Default for Chord {
    fn default() -> Self {
        Self::with_default_taps(KeySequence::new(vec![
            KeyEvent::ctrl('c'),
            KeyEvent::char('n'),
        ]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
