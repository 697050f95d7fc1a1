//! Error types for the lifex library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum LifexError {
    /// The input could not be read, or its container is malformed.
    #[error("Cannot read source '{path}': {message}")]
    SourceRead { path: PathBuf, message: String },

    /// A structural assumption about the table was violated.
    #[error("Schema error: {0}")]
    Schema(String),

    /// No loader/cleaner pair matches the input.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Region code is not part of the catalog.
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// The cleaned table could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl LifexError {
    /// Build a `SourceRead` error for `path`.
    pub fn source_read(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        LifexError::SourceRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Coarse classification used when reporting to users.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifexError::SourceRead { .. } => ErrorKind::SourceRead,
            LifexError::Schema(_) => ErrorKind::Schema,
            LifexError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            LifexError::InvalidRegion(_) => ErrorKind::InvalidRegion,
            LifexError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// Error classification without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceRead,
    Schema,
    UnsupportedFormat,
    InvalidRegion,
    Persistence,
}

impl ErrorKind {
    /// Stable short name.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::SourceRead => "source-read",
            ErrorKind::Schema => "schema",
            ErrorKind::UnsupportedFormat => "unsupported-format",
            ErrorKind::InvalidRegion => "invalid-region",
            ErrorKind::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result type alias for lifex operations.
pub type Result<T> = std::result::Result<T, LifexError>;
