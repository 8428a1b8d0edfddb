//! Error types for the NoteGraph system.
//!
//! The graph engine itself never fails: unresolved references, missing
//! focal notes and degenerate graphs all degrade to "no data" results.
//! [`Error`] covers the ambient operations around it (configuration,
//! collection import, export serialization).

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all NoteGraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Parse error (note collection, metadata, arguments)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Serialization of an export failed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization_error(reason: impl Into<String>) -> Self {
        Error::SerializationError {
            reason: reason.into(),
        }
    }
}
