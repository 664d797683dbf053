//! The process-wide default logger instance.

use std::sync::LazyLock;

use crate::error::Result;
use crate::logger::Logger;

/// Lazily initialized on first use; lives for the rest of the process.
static DEFAULT: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The process-wide default logger.
///
/// Created lazily on first use and globally addressable thereafter. The
/// `logv!` .. `logf!` macros route through it.
pub fn default_logger() -> &'static Logger {
    &DEFAULT
}

/// Flush the default logger's pending buffered bytes.
pub fn flush() -> Result<()> {
    default_logger().flush()
}

/// Final flush and durability barrier for process teardown.
///
/// Statics are not dropped at process exit, so hosts that buffer to a file
/// should call this (or [`flush`]) before exiting. Console-only hosts never
/// need to.
pub fn shutdown() -> Result<()> {
    default_logger().fsync()
}
