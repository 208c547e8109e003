//! Domain-specific error types for the sync engine.
//!
//! Internal modules return typed errors ([`SyncError`], [`ConfigError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SyncError                - one entry could not be tracked/untracked/linked/unlinked
//! ├── NotFound             - a required home- or tracked-side path is absent
//! ├── NotManaged           - home path exists but dotify does not manage it
//! ├── InvalidName          - the requested name cannot name a home entry
//! └── Io                   - unexpected filesystem failure (permissions, disk full, …)
//!
//! ConfigError              - user config could not be read; always recovered
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Which side of the home/tracked pairing a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The entry's location in the home directory.
    Home,
    /// The entry's copy inside the tracked directory.
    Tracked,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home directory"),
            Self::Tracked => write!(f, "tracked directory"),
        }
    }
}

/// Failure of a single-entry sync operation.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A path the operation requires does not exist.
    #[error("'{name}' {reason}: not found in the {side}")]
    NotFound {
        /// Entry name.
        name: String,
        /// Side whose path is missing.
        side: Side,
        /// Short outcome phrase (`"nothing to track"`, `"does not exist"`, …).
        reason: &'static str,
    },

    /// The home path exists but has no managed counterpart.
    #[error("'{name}' is not managed by dotify")]
    NotManaged {
        /// Entry name.
        name: String,
    },

    /// The requested name does not identify a single home entry.
    #[error("invalid entry name '{0}'")]
    InvalidName(String),

    /// An unexpected I/O failure while mutating or inspecting the filesystem.
    #[error("I/O failure on {}: {source:#}", path.display())]
    Io {
        /// Path being operated on when the failure occurred.
        path: PathBuf,
        /// Underlying error chain.
        source: anyhow::Error,
    },
}

impl SyncError {
    /// Short phrase suitable for a per-entry status line.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound { reason, .. } => reason,
            Self::NotManaged { .. } => "not managed",
            Self::InvalidName(_) => "invalid name",
            Self::Io { .. } => "I/O failure",
        }
    }

    /// Wrap an I/O-level error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Errors that arise while reading the user configuration file.
///
/// The loader recovers from every variant by falling back to defaults; the
/// type exists so the reason can be logged.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected shape.
    #[error("Invalid TOML in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },
}
