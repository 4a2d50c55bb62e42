//! # Store Error Types
//!
//! Error types for loading and saving the data files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / bad line in Currency.txt                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path and line number                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (in vend-cli) ← Printed once at the top level           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vend_core::{Denomination, ValidationError};

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file does not exist.
    ///
    /// ## When This Occurs
    /// - Fresh data directory that was never seeded
    /// - Wrong `data_dir` in the configuration
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading, writing or renaming failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be understood.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The same face value appears twice in the till file.
    #[error("{}:{line}: denomination {denomination} listed twice", path.display())]
    DuplicateDenomination {
        path: PathBuf,
        line: usize,
        denomination: Denomination,
    },

    /// A record parsed but breaks a domain rule (empty name, zero face value).
    #[error("{}:{line}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        line: usize,
        #[source]
        source: ValidationError,
    },
}

impl StoreError {
    /// Maps an I/O error, turning `NotFound` into [`StoreError::NotFound`].
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn parse(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        StoreError::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(path: &Path, line: usize, source: ValidationError) -> Self {
        StoreError::Invalid {
            path: path.to_path_buf(),
            line,
            source,
        }
    }

    /// True when the file simply was not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
