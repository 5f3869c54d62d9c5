//! Error type for the configuration and binding layers.
//!
//! Navigation itself never fails: every step is total arithmetic over bounds
//! the host supplies. Errors only come from turning user input (key notation,
//! command names, config files) into bindings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while parsing keys, commands, or configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Key notation that doesn't describe a key, e.g. `"C-"` or `"X-a"`.
    #[error("invalid key notation {notation:?}: {reason}")]
    KeyParse { notation: String, reason: String },

    /// A command name nothing knows how to run.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Two commands bound to the same key sequence.
    #[error("key {keys} is bound to both {first} and {second}")]
    DuplicateBinding {
        keys: String,
        first: String,
        second: String,
    },

    /// A binding that is a strict prefix of another one (or vice versa), so
    /// the longer one could never fire.
    #[error("key {prefix} shadows the longer binding {keys}")]
    PrefixConflict { prefix: String, keys: String },

    /// Reading a config file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file isn't valid TOML or doesn't match the schema.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn key(notation: &str, reason: impl Into<String>) -> Self {
        Self::KeyParse {
            notation: notation.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
