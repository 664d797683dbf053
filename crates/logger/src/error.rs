//! Error types for the logging facility.

use std::io;
use std::path::PathBuf;

/// Result type for logger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while emitting or managing log output.
///
/// Emission is fail-safe with respect to the host application: these errors
/// are returned as status, never panicked or propagated through any other
/// channel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create the log directory.
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Failed to rotate the active log file.
    #[error("failed to rotate log file: {0}")]
    Rotation(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The file writer is degraded and dropping records until it is
    /// reconfigured with a usable path.
    #[error("file writer degraded; records are being dropped")]
    Degraded,

    /// The writer has been closed and accepts no further records.
    #[error("writer is closed")]
    Closed,
}
