//! Error types for sweep operations.
//!
//! [`FileError`] covers failures that concern a single candidate and are
//! absorbed by the scan cycle. [`SweepError`] covers everything else and
//! stops the scheduler.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A failure confined to one file. The cycle logs it and moves on.
#[derive(Debug, Error)]
pub enum FileError {
    /// Timestamp metadata could not be read.
    #[error("Cannot stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be removed.
    #[error("Failed to remove {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Create a stat error with path context.
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    /// Create a delete error with path context.
    pub fn delete(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Delete {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Stat { path, .. } | Self::Delete { path, .. } => path,
        }
    }

    /// Underlying I/O error.
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            Self::Stat { source, .. } | Self::Delete { source, .. } => source,
        }
    }

    /// Whether the file disappeared before we got to it.
    pub fn is_vanished(&self) -> bool {
        self.io_error().kind() == std::io::ErrorKind::NotFound
    }
}

/// Errors that end the sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A glob pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A scan cycle died unexpectedly, leaving the sweeper in an unknown state.
    #[error("{message}")]
    Fatal { message: String },
}

impl SweepError {
    /// Create a fatal error from any message.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }
}
