//! Keys and key sequences, with Emacs-style notation.
//!
//! Bindings are written the way Emacs users already read them:
//!
//! | Notation        | Meaning                              |
//! |-----------------|--------------------------------------|
//! | `a`, `,`, `<`   | a printable character                |
//! | `C-c`           | Ctrl + c                             |
//! | `M-x`           | Alt (Meta) + x                       |
//! | `S-<up>`        | Shift + Up arrow                     |
//! | `s-a`           | Super + a                            |
//! | `<left>` `<f5>` | named keys in angle brackets         |
//! | `SPC` `RET` `TAB` `ESC` `DEL` | common named keys      |
//!
//! A [`KeySequence`] is whitespace-separated keys: `"C-c ,"` is Ctrl+c
//! followed by a comma.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Error, Result};

// ─── Key Types ──────────────────────────────────────────────────────────────

/// Identity of a key.
///
/// Printable characters use [`Char`](KeyCode::Char). Function keys F1–F35
/// use [`F`](KeyCode::F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F35.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

/// A key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// An unmodified character key.
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), Modifiers::empty())
    }

    /// Ctrl + character.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), Modifiers::CTRL)
    }

    /// Parse a single key in Emacs notation (`"C-c"`, `"<left>"`, `","`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyParse`] for unknown modifiers or key names.
    pub fn parse(notation: &str) -> Result<Self> {
        let mut rest = notation;
        let mut modifiers = Modifiers::empty();

        // Peel `X-` prefixes. A bare "-" or a trailing "C-" is a key, not a
        // modifier, so only treat it as one when something follows.
        while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
            let flag = match rest.as_bytes()[0] {
                b'C' => Modifiers::CTRL,
                b'M' => Modifiers::ALT,
                b'S' => Modifiers::SHIFT,
                b's' => Modifiers::SUPER,
                other => {
                    return Err(Error::key(
                        notation,
                        format!("unknown modifier {:?}", char::from(other)),
                    ));
                }
            };
            if modifiers.contains(flag) {
                return Err(Error::key(notation, "modifier repeated"));
            }
            modifiers |= flag;
            rest = &rest[2..];
        }

        let code = parse_code(rest).ok_or_else(|| {
            if rest.is_empty() {
                Error::key(notation, "missing key")
            } else {
                Error::key(notation, format!("unknown key {rest:?}"))
            }
        })?;

        Ok(Self { code, modifiers })
    }
}

impl FromStr for KeyEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.trim())
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, prefix) in [
            (Modifiers::CTRL, "C-"),
            (Modifiers::ALT, "M-"),
            (Modifiers::SHIFT, "S-"),
            (Modifiers::SUPER, "s-"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("SPC"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            KeyCode::Enter => f.write_str("RET"),
            KeyCode::Tab => f.write_str("TAB"),
            KeyCode::Escape => f.write_str("ESC"),
            KeyCode::Backspace => f.write_str("DEL"),
            KeyCode::Delete => f.write_str("<delete>"),
            KeyCode::Insert => f.write_str("<insert>"),
            KeyCode::Up => f.write_str("<up>"),
            KeyCode::Down => f.write_str("<down>"),
            KeyCode::Left => f.write_str("<left>"),
            KeyCode::Right => f.write_str("<right>"),
            KeyCode::Home => f.write_str("<home>"),
            KeyCode::End => f.write_str("<end>"),
            KeyCode::PageUp => f.write_str("<prior>"),
            KeyCode::PageDown => f.write_str("<next>"),
            KeyCode::F(n) => write!(f, "<f{n}>"),
        }
    }
}

/// Decode the key part of a notation (everything after the modifiers).
fn parse_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(ch));
    }

    let code = match s {
        "SPC" => KeyCode::Char(' '),
        "RET" => KeyCode::Enter,
        "TAB" => KeyCode::Tab,
        "ESC" => KeyCode::Escape,
        "DEL" => KeyCode::Backspace,
        _ => {
            let name = s.strip_prefix('<')?.strip_suffix('>')?;
            match name {
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "prior" | "pageup" => KeyCode::PageUp,
                "next" | "pagedown" => KeyCode::PageDown,
                "delete" => KeyCode::Delete,
                "insert" => KeyCode::Insert,
                "return" => KeyCode::Enter,
                "tab" => KeyCode::Tab,
                "escape" => KeyCode::Escape,
                "backspace" => KeyCode::Backspace,
                _ => {
                    let n: u8 = name.strip_prefix('f')?.parse().ok()?;
                    if (1..=35).contains(&n) {
                        KeyCode::F(n)
                    } else {
                        return None;
                    }
                }
            }
        }
    };
    Some(code)
}

// ─── Key Sequences ──────────────────────────────────────────────────────────

/// One or more keys pressed in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence(Vec<KeyEvent>);

impl KeySequence {
    /// Build a sequence from keys.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `keys` is empty.
    #[must_use]
    pub fn new(keys: Vec<KeyEvent>) -> Self {
        debug_assert!(!keys.is_empty(), "KeySequence must not be empty");
        Self(keys)
    }

    /// Parse whitespace-separated keys, e.g. `"C-c ,"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyParse`] if the notation is empty or any key in it
    /// is invalid.
    pub fn parse(notation: &str) -> Result<Self> {
        let keys = notation
            .split_whitespace()
            .map(KeyEvent::parse)
            .collect::<Result<Vec<_>>>()?;
        if keys.is_empty() {
            return Err(Error::key(notation, "empty key sequence"));
        }
        Ok(Self(keys))
    }

    /// The keys in order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[KeyEvent] {
        &self.0
    }

    /// Number of keys.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when `keys` is a strict prefix of this sequence.
    #[must_use]
    pub fn has_prefix(&self, keys: &[KeyEvent]) -> bool {
        keys.len() < self.0.len() && self.0.starts_with(keys)
    }
}

impl From<KeyEvent> for KeySequence {
    fn from(key: KeyEvent) -> Self {
        Self(vec![key])
    }
}

impl FromStr for KeySequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
