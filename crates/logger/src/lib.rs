//! Embeddable leveled logging with colorized console output and buffered,
//! rotating file output.
//!
//! This crate provides a small, thread-safe logger for processes that need
//! diagnostic output without a heavyweight logging framework:
//! - Leveled emission with a cheap threshold gate
//! - Optional ANSI-colorized records
//! - Console (stdout/stderr) and buffered file sinks behind one trait
//! - Size- and day-based file rotation with retention pruning
//! - Optional fsync-per-record durability
//!
//! # Quick start
//!
//! ```no_run
//! use ember_logger::{Level, Logger};
//!
//! let logger = Logger::new();
//! logger.set_level(Level::Info);
//! logger.set_max_file_size(16 * 1024 * 1024);
//! logger.set_remain_days(7);
//! logger.set_file("/var/log/app.log");
//!
//! let _ = logger.emit(Level::Info, format_args!("listening on port {}", 8080));
//! ```
//!
//! Or use the process-wide default instance through the macros:
//!
//! ```
//! ember_logger::default_logger().set_level(ember_logger::Level::Warn);
//! ember_logger::logw!("low disk space: {} MiB left", 12);
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod format;
mod global;
mod level;
mod logger;
mod macros;
mod sink;
mod writer;

pub use config::{
    DEFAULT_MAX_BUFFER_SIZE, DEFAULT_MAX_FILE_SIZE, DEFAULT_REMAIN_DAYS, FileSinkConfig,
    FileSinkConfigBuilder,
};
pub use error::{Error, Result};
pub use format::format_record;
pub use global::{default_logger, flush, shutdown};
pub use level::Level;
pub use logger::{EmitStatus, Handler, Logger};
pub use sink::{ConsoleSink, ConsoleStream, FileSink, Sink};
