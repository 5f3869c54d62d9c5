//! Configuration: key bindings and the chord launcher, from TOML.
//!
//! Every field is optional. Anything left out keeps its default:
//!
//! ```toml
//! [bindings]
//! # command name = key sequence; an empty string leaves it unbound
//! line-step-backward = "C-c ,"
//! buffer-step-forward = "<f8>"
//!
//! [chord]
//! enabled = true
//! launcher = "C-c n"
//!
//! # Replaces the default taps entirely when present.
//! [chord.keys]
//! h = "line-step-backward"
//! l = "line-step-forward"
//! ```
//!
//! Command names accept kebab-case or snake_case. The config file lives at
//! `$HALVE_CONFIG_DIR/config.toml`, or `<config dir>/halve/config.toml`
//! (`~/.config/halve/config.toml` on Linux).

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::NavCommand;
use crate::error::{Error, Result};
use crate::key::{KeyEvent, KeySequence};
use crate::keymap::{Bindings, Chord};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "HALVE_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides for the six command bindings, by command name.
    pub bindings: BTreeMap<String, String>,
    /// Chord launcher settings.
    pub chord: ChordConfig,
}

/// The `[chord]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordConfig {
    /// Whether the launcher is registered at all.
    pub enabled: bool,
    /// Key sequence that enters the chord.
    pub launcher: String,
    /// Tap key → command name. `None` keeps the default taps.
    pub keys: Option<BTreeMap<String, String>>,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            launcher: Chord::default().launcher().to_string(),
            keys: None,
        }
    }
}

/// The config directory: `$HALVE_CONFIG_DIR`, else `<config dir>/halve`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(env::var_os(CONFIG_DIR_ENV))
}

/// [`config_dir`] with the override value passed in. An empty override
/// counts as unset.
#[must_use]
pub fn config_dir_from(override_dir: Option<OsString>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|p| p.join("halve")),
    }
}

/// The default config file path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] if the text isn't valid TOML or doesn't match
    /// the schema.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file can't be read, or [`Error::Toml`] if
    /// it can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the config from the default location, or defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), for a file that exists but is broken.
    pub fn load_default() -> Result<Self> {
        config_path().map_or_else(|| Ok(Self::default()), |path| Self::load_or_default(&path))
    }

    /// Load `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the file is there.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// The effective command bindings: defaults with overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] or [`Error::KeyParse`] for a bad
    /// entry.
    pub fn bindings(&self) -> Result<Bindings> {
        let mut bindings = Bindings::default();
        for (name, keys) in &self.bindings {
            let command: NavCommand = name.parse()?;
            if keys.trim().is_empty() {
                bindings.remove(command);
            } else {
                bindings.set(command, KeySequence::parse(keys)?);
            }
        }
        Ok(bindings)
    }

    /// The chord launcher, or `None` when disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyParse`] for a bad launcher or tap key, and
    /// [`Error::UnknownCommand`] for a bad tap command. Taps must be single
    /// keys.
    pub fn chord(&self) -> Result<Option<Chord>> {
        if !self.chord.enabled {
            return Ok(None);
        }
        let launcher = KeySequence::parse(&self.chord.launcher)?;

        let Some(keys) = &self.chord.keys else {
            return Ok(Some(Chord::with_default_taps(launcher)));
        };

        let mut chord = Chord::new(launcher);
        for (key, name) in keys {
            let tap = KeyEvent::parse(key.trim())?;
            chord.add_tap(tap, name.parse()?);
        }
        Ok(Some(chord))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bindings().unwrap(), Bindings::default());
        assert_eq!(config.chord().unwrap(), Some(Chord::default()));
    }

    #[test]
    fn binding_overrides() {
        let config = Config::from_toml_str(
            r#"
[bindings]
line-step-forward = "<f6>"
buffer_step_backward = "C-x ["
"#,
        )
        .unwrap();
        let b = config.bindings().unwrap();
        assert_eq!(
            b.get(NavCommand::LINE_FORWARD),
            Some(&KeySequence::parse("<f6>").unwrap())
        );
        assert_eq!(
            b.get(NavCommand::BUFFER_BACKWARD),
            Some(&KeySequence::parse("C-x [").unwrap())
        );
        // Untouched entries keep their defaults.
        assert_eq!(
            b.get(NavCommand::WINDOW_FORWARD),
            Bindings::default().get(NavCommand::WINDOW_FORWARD)
        );
    }

    #[test]
    fn empty_binding_unbinds() {
        let config = Config::from_toml_str("[bindings]\nline-step-backward = \"\"\n").unwrap();
        let b = config.bindings().unwrap();
        assert_eq!(b.get(NavCommand::LINE_BACKWARD), None);
        assert_eq!(b.iter().count(), 5);
    }

    #[test]
    fn unknown_command_is_error() {
        let config = Config::from_toml_str("[bindings]\njump-around = \"C-j\"\n").unwrap();
        assert!(matches!(config.bindings(), Err(Error::UnknownCommand(_))));
    }

    #[test]
    fn bad_key_is_error() {
        let config = Config::from_toml_str("[bindings]\nline-step-forward = \"Q-x\"\n").unwrap();
        assert!(matches!(config.bindings(), Err(Error::KeyParse { .. })));
    }

    #[test]
    fn invalid_toml_is_error() {
        assert!(matches!(
            Config::from_toml_str("[bindings"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn chord_disabled() {
        let config = Config::from_toml_str("[chord]\nenabled = false\n").unwrap();
        assert_eq!(config.chord().unwrap(), None);
    }

    #[test]
    fn chord_custom_launcher_keeps_default_taps() {
        let config = Config::from_toml_str("[chord]\nlauncher = \"M-n\"\n").unwrap();
        let chord = config.chord().unwrap().unwrap();
        assert_eq!(chord.launcher(), &KeySequence::parse("M-n").unwrap());
        assert_eq!(chord.tap_count(), 6);
        assert_eq!(chord.tap(&KeyEvent::char('J')), Some(NavCommand::BUFFER_FORWARD));
    }

    #[test]
    fn chord_custom_keys_replace_defaults() {
        let config = Config::from_toml_str(
            r#"
[chord.keys]
"," = "line-step-backward"
"." = "line-step-forward"
"#,
        )
        .unwrap();
        let chord = config.chord().unwrap().unwrap();
        assert_eq!(chord.tap_count(), 2);
        assert_eq!(chord.tap(&KeyEvent::char('.')), Some(NavCommand::LINE_FORWARD));
        assert_eq!(chord.tap(&KeyEvent::char('h')), None);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[bindings]\nwindow-step-forward = \"C-c v\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.bindings().unwrap().get(NavCommand::WINDOW_FORWARD),
            Some(&KeySequence::parse("C-c v").unwrap())
        );
    }

    #[test]
    fn config_dir_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let found = config_dir_from(Some(dir.path().as_os_str().to_owned()));
        assert_eq!(found.as_deref(), Some(dir.path()));
    }

    #[test]
    fn config_dir_empty_override_falls_back() {
        let fallback = dirs::config_dir().map(|p| p.join("halve"));
        assert_eq!(config_dir_from(Some(OsString::new())), fallback);
        assert_eq!(config_dir_from(None), fallback);
    }

    #[test]
    fn load_or_default_without_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_reads_file_in_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = config_dir_from(Some(dir.path().as_os_str().to_owned())).unwrap();
        fs::write(root.join(CONFIG_FILE), "[chord]\nenabled = false\n").unwrap();

        let config = Config::load_or_default(&root.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.chord().unwrap(), None);
    }

    #[test]
    fn load_or_default_still_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[chord").unwrap();
        assert!(matches!(Config::load_or_default(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
