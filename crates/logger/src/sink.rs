//! Sink handlers: where formatted record bytes go.

use std::io::{self, Write};

use crate::config::FileSinkConfig;
use crate::error::Result;
use crate::level::Level;
use crate::writer::RotatingFileWriter;

/// A destination that accepts formatted log records.
///
/// The logger instance serializes all calls through its critical section, so
/// implementations never see concurrent invocations from the same logger.
pub trait Sink: Send {
    /// Accept one whole formatted record. Returns the number of bytes
    /// accepted.
    fn accept(&mut self, level: Level, bytes: &[u8]) -> Result<usize>;

    /// Flush any internally buffered bytes to the underlying destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Block until previously accepted bytes are durable on storage.
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flush and release any held resources. Called when the sink is
    /// replaced or the logger is dropped.
    fn close(&mut self) {}
}

/// Standard stream selector for [`ConsoleSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Sink writing records to a standard stream.
///
/// Each write holds the stream's process-wide lock, so records never
/// interleave mid-line even across logger instances sharing the stream.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self {
            stream: ConsoleStream::Stdout,
        }
    }

    /// Sink writing to standard error.
    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    /// The stream this sink writes to.
    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn accept(&mut self, _level: Level, bytes: &[u8]) -> Result<usize> {
        match self.stream {
            ConsoleStream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                // Stdout is line buffered; push the record out while the
                // lock is still held.
                out.flush()?;
            }
            ConsoleStream::Stderr => {
                io::stderr().lock().write_all(bytes)?;
            }
        }
        Ok(bytes.len())
    }
}

/// Sink delegating to the buffered rotating file writer.
pub struct FileSink {
    writer: RotatingFileWriter,
}

impl FileSink {
    /// Create a file sink for `config`, opening the active file eagerly.
    pub fn new(config: FileSinkConfig) -> Self {
        Self {
            writer: RotatingFileWriter::new(config),
        }
    }

    pub(crate) fn writer_mut(&mut self) -> &mut RotatingFileWriter {
        &mut self.writer
    }
}

impl Sink for FileSink {
    fn accept(&mut self, _level: Level, bytes: &[u8]) -> Result<usize> {
        self.writer.append(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.sync()
    }

    fn close(&mut self) {
        self.writer.close();
    }
}
