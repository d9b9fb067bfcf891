//! Error types for the core crate.

use std::path::PathBuf;

/// Errors produced while parsing a keystroke such as `"Ctrl+O"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// The string is empty.
    #[error("empty key combination")]
    Empty,
    /// Only modifiers were given.
    #[error("no key specified (only modifiers)")]
    NoKey,
    /// More than one non-modifier key was given.
    #[error("more than one key in combination: '{0}'")]
    MultipleKeys(String),
    /// Unknown key or modifier name.
    #[error("unknown key: '{0}'")]
    UnknownKey(String),
}

/// Errors produced while loading platform conventions.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The conventions file could not be read.
    #[error("failed to read conventions '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The conventions file is not valid TOML or has unknown values.
    #[error("invalid conventions: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
