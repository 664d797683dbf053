//! The logger instance: level gating, formatting, and sink dispatch.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::config::FileSinkConfig;
use crate::error::Result;
use crate::format::format_record;
use crate::level::Level;
use crate::sink::{ConsoleSink, FileSink, Sink};

/// Outcome of a single [`Logger::emit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// The record was formatted and accepted by the sink; the payload is the
    /// number of bytes written.
    Written(usize),
    /// The record's level is below the threshold. Nothing was formatted and
    /// no I/O happened; this is not a failure.
    Filtered,
}

/// The active sink handler. At most one is active per logger at a time.
pub enum Handler {
    /// Write records to a standard stream.
    Console(ConsoleSink),
    /// Write records to a buffered rotating file.
    File(FileSink),
    /// A caller-supplied sink.
    Custom(Box<dyn Sink>),
}

impl Handler {
    fn as_sink_mut(&mut self) -> &mut dyn Sink {
        match self {
            Handler::Console(sink) => sink,
            Handler::File(sink) => sink,
            Handler::Custom(sink) => sink.as_mut(),
        }
    }
}

struct Inner {
    handler: Handler,
    /// Template applied whenever a file sink is (re)built via
    /// [`Logger::set_file`].
    file_config: FileSinkConfig,
}

/// A thread-safe leveled logger.
///
/// One instance owns one level threshold, one color flag, and one active
/// sink handler. Emission is serialized through a single critical section,
/// so concurrent callers never interleave records or corrupt the buffer and
/// file-handle state. The level and color flag are plain atomics readable
/// without the lock; a reader may observe a momentarily stale value, never a
/// torn one.
///
/// Dropping the logger flushes pending buffered bytes and closes the file
/// handle.
pub struct Logger {
    level: AtomicU8,
    color: AtomicBool,
    /// Upper bound on one formatted record; mirrors the file buffer
    /// capacity so a record always fits the buffer.
    max_record: AtomicUsize,
    inner: Mutex<Inner>,
}

impl Logger {
    /// Create a logger with defaults: level `Verbose`, color off, records
    /// routed to standard error.
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(Level::Verbose as u8),
            color: AtomicBool::new(false),
            max_record: AtomicUsize::new(crate::config::DEFAULT_MAX_BUFFER_SIZE),
            inner: Mutex::new(Inner {
                handler: Handler::Console(ConsoleSink::stderr()),
                file_config: FileSinkConfig::new(""),
            }),
        }
    }

    /// The minimum severity that will be emitted.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Set the minimum severity. Records below it are dropped at the check
    /// point, before formatting or I/O. [`Level::Silent`] disables all
    /// output.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Set the minimum severity by name (`"verbose"` .. `"silent"`,
    /// case-insensitive).
    pub fn set_level_str(&self, name: &str) -> Result<()> {
        self.set_level(name.parse()?);
        Ok(())
    }

    /// Whether ANSI color escapes are included in formatted records.
    pub fn color_enabled(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }

    /// Toggle ANSI color escapes in formatted records.
    pub fn enable_color(&self, on: bool) {
        self.color.store(on, Ordering::Relaxed);
    }

    /// Replace the active sink handler. The old handler is flushed and
    /// closed first.
    pub fn set_handler(&self, handler: Handler) {
        let mut inner = self.inner.lock();
        inner.handler.as_sink_mut().close();
        inner.handler = handler;
    }

    /// Route records to a buffered rotating file at `path`, built from the
    /// accumulated file configuration (max file size, retention, fsync,
    /// buffer capacity). Replaces the current handler.
    pub fn set_file(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.lock();
        inner.file_config.path = path.into();
        let config = inner.file_config.clone();
        inner.handler.as_sink_mut().close();
        inner.handler = Handler::File(FileSink::new(config));
    }

    /// Set the maximum active file size; exceeding it triggers rotation.
    /// Applies immediately to an active file sink.
    pub fn set_max_file_size(&self, bytes: u64) {
        let mut inner = self.inner.lock();
        inner.file_config.max_file_size = bytes;
        if let Handler::File(sink) = &mut inner.handler {
            sink.writer_mut().set_max_file_size(bytes);
        }
    }

    /// Set how many archived files are retained for the base path.
    pub fn set_remain_days(&self, days: usize) {
        let mut inner = self.inner.lock();
        inner.file_config.remain_days = days;
        if let Handler::File(sink) = &mut inner.handler {
            sink.writer_mut().set_remain_days(days);
        }
    }

    /// Force a flush-and-sync after every append, trading throughput for
    /// crash-safety.
    pub fn enable_fsync(&self, on: bool) {
        let mut inner = self.inner.lock();
        inner.file_config.fsync = on;
        if let Handler::File(sink) = &mut inner.handler {
            sink.writer_mut().set_fsync(on);
        }
    }

    /// Resize the file buffer. Pending bytes are flushed first. The new
    /// capacity also bounds the size of a single formatted record.
    pub fn set_max_buffer_size(&self, bytes: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.file_config.max_buffer_size = bytes;
        self.max_record.store(bytes, Ordering::Relaxed);
        if let Handler::File(sink) = &mut inner.handler {
            sink.writer_mut().set_buffer_capacity(bytes)?;
        }
        Ok(())
    }

    /// Emit one record: level gate, format, dispatch.
    ///
    /// Below-threshold records cost one comparison and return
    /// [`EmitStatus::Filtered`]. Failures surface as an error status; they
    /// never panic and never abort the emitting thread.
    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) -> Result<EmitStatus> {
        if level == Level::Silent || level < self.level() {
            return Ok(EmitStatus::Filtered);
        }

        // Formatting is pure, so it stays outside the critical section; the
        // ordering guarantee is defined by lock acquisition at dispatch.
        let message = args.to_string();
        let record = format_record(
            level,
            self.color_enabled(),
            &message,
            self.max_record.load(Ordering::Relaxed),
        );

        let mut inner = self.inner.lock();
        let written = inner.handler.as_sink_mut().accept(level, &record)?;
        Ok(EmitStatus::Written(written))
    }

    /// Flush pending buffered bytes to the sink's destination.
    pub fn flush(&self) -> Result<()> {
        self.inner.lock().handler.as_sink_mut().flush()
    }

    /// Synchronous durability barrier: flush and block until the storage
    /// acknowledges previously written bytes.
    pub fn fsync(&self) -> Result<()> {
        self.inner.lock().handler.as_sink_mut().sync()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.inner.get_mut().handler.as_sink_mut().close();
    }
}
