//! Buffered file writer with size- and age-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::config::FileSinkConfig;
use crate::error::{Error, Result};

/// Writer lifecycle states. Rotation is a transient condition inside
/// [`RotatingFileWriter::append`], not a resting state.
#[derive(Debug)]
enum State {
    /// No usable file handle (mid-rotation); writes are dropped.
    Uninitialized,
    /// An active file handle exists and the buffer accepts bytes.
    Open(ActiveFile),
    /// The file could not be opened; writes are dropped until the writer is
    /// rebuilt with a usable path.
    Degraded,
    /// Final flush performed, handle released; no further writes accepted.
    Closed,
}

#[derive(Debug)]
struct ActiveFile {
    file: File,
    /// Bytes already flushed to disk. The logical file size is this plus the
    /// buffer fill.
    disk_size: u64,
    /// Local day the file was opened; advancing past it triggers rotation.
    opened_on: NaiveDate,
}

/// Accumulates record bytes in a fixed-capacity buffer, flushes them to the
/// active file, and rotates the file when the size or day threshold is
/// crossed.
///
/// All methods assume the caller serializes access; the logger instance holds
/// its critical section across every call.
pub(crate) struct RotatingFileWriter {
    config: FileSinkConfig,
    buf: Vec<u8>,
    state: State,
    /// Whether the current failure episode has already been reported, so a
    /// flood of failing appends produces a single diagnostic.
    reported: bool,
}

impl RotatingFileWriter {
    /// Create a writer for `config`, opening the active file eagerly so
    /// configuration errors surface (once) at setup time.
    pub(crate) fn new(config: FileSinkConfig) -> Self {
        let mut writer = Self {
            buf: Vec::with_capacity(config.max_buffer_size),
            config,
            state: State::Uninitialized,
            reported: false,
        };
        writer.reopen();
        writer
    }

    /// Append one formatted record.
    ///
    /// Write path: rotate first if this append would push the logical file
    /// size past the limit or the day has advanced (flush-then-rotate), then
    /// flush if the buffer would overflow, then buffer the bytes. With fsync
    /// enabled every append is flushed and synced before returning.
    pub(crate) fn append(&mut self, bytes: &[u8]) -> Result<usize> {
        match self.state {
            State::Open(_) => {}
            State::Closed => return Err(Error::Closed),
            State::Uninitialized | State::Degraded => return Err(Error::Degraded),
        }

        self.rotate_if_needed(bytes.len() as u64)?;

        let capacity = self.config.max_buffer_size;
        if self.buf.len() + bytes.len() > capacity {
            self.flush()?;
        }
        if bytes.len() >= capacity {
            // A record at least as large as the buffer writes through,
            // keeping the fill-never-exceeds-capacity invariant.
            self.write_through(bytes)?;
        } else {
            self.buf.extend_from_slice(bytes);
        }

        if self.config.fsync {
            self.flush()?;
            self.sync()?;
        }
        Ok(bytes.len())
    }

    /// Flush buffered bytes into the active file.
    ///
    /// On failure the buffer is left intact so already-accepted records are
    /// retried at the next flush opportunity.
    pub(crate) fn flush(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let err = match &mut self.state {
            State::Open(active) => match active.file.write_all(&self.buf) {
                Ok(()) => {
                    active.disk_size += self.buf.len() as u64;
                    self.buf.clear();
                    self.reported = false;
                    return Ok(());
                }
                Err(source) => Error::Io(source),
            },
            State::Closed => return Err(Error::Closed),
            State::Uninitialized | State::Degraded => return Err(Error::Degraded),
        };
        self.report(&err);
        Err(err)
    }

    /// Block until previously flushed bytes are durable on storage.
    pub(crate) fn sync(&mut self) -> Result<()> {
        match &mut self.state {
            State::Open(active) => {
                active.file.sync_all()?;
                Ok(())
            }
            State::Closed => Err(Error::Closed),
            State::Uninitialized | State::Degraded => Err(Error::Degraded),
        }
    }

    /// Resize the buffer. Old contents are flushed first; the resize is
    /// skipped if that flush fails.
    pub(crate) fn set_buffer_capacity(&mut self, capacity: usize) -> Result<()> {
        self.flush()?;
        self.config.max_buffer_size = capacity;
        self.buf = Vec::with_capacity(capacity);
        Ok(())
    }

    pub(crate) fn set_max_file_size(&mut self, bytes: u64) {
        self.config.max_file_size = bytes;
    }

    pub(crate) fn set_remain_days(&mut self, days: usize) {
        self.config.remain_days = days;
    }

    pub(crate) fn set_fsync(&mut self, on: bool) {
        self.config.fsync = on;
    }

    /// Final flush and handle release. Idempotent.
    pub(crate) fn close(&mut self) {
        if matches!(self.state, State::Closed) {
            return;
        }
        let _ = self.flush();
        if self.config.fsync {
            let _ = self.sync();
        }
        self.state = State::Closed;
    }

    /// Write an oversized record directly to the file, past the buffer.
    fn write_through(&mut self, bytes: &[u8]) -> Result<()> {
        let err = match &mut self.state {
            State::Open(active) => match active.file.write_all(bytes) {
                Ok(()) => {
                    active.disk_size += bytes.len() as u64;
                    return Ok(());
                }
                Err(source) => Error::Io(source),
            },
            State::Closed => return Err(Error::Closed),
            State::Uninitialized | State::Degraded => return Err(Error::Degraded),
        };
        self.report(&err);
        Err(err)
    }

    /// Rotate if appending `incoming` bytes would exceed the max file size,
    /// or if the wall-clock day has advanced past the file's opening day.
    /// Both conditions are satisfied by a single rotation event.
    fn rotate_if_needed(&mut self, incoming: u64) -> Result<()> {
        let today = Local::now().date_naive();
        let (logical, day_changed) = match &mut self.state {
            State::Open(active) => {
                let logical = active.disk_size + self.buf.len() as u64;
                if today != active.opened_on && logical == 0 {
                    // Nothing written since the day turned over; adopt the
                    // new day rather than archiving an empty file.
                    active.opened_on = today;
                    return Ok(());
                }
                (logical, today != active.opened_on)
            }
            _ => return Ok(()),
        };

        let size_exceeded = logical > 0 && logical + incoming > self.config.max_file_size;
        if size_exceeded || day_changed {
            self.rotate()?;
        }
        Ok(())
    }

    /// Flush, archive the active file under a date suffix, prune archives
    /// beyond the retention count, and open a fresh file at the base path.
    fn rotate(&mut self) -> Result<()> {
        self.flush()?;

        let State::Open(active) = std::mem::replace(&mut self.state, State::Uninitialized) else {
            return Ok(());
        };
        let opened_on = active.opened_on;
        // Release the handle before the rename.
        drop(active);

        let archive = archive_path(&self.config.path, opened_on);
        if let Err(source) = fs::rename(&self.config.path, &archive) {
            let err = Error::Rotation(format!(
                "renaming {} to {}: {source}",
                self.config.path.display(),
                archive.display()
            ));
            self.report(&err);
            // The active file is still intact; keep appending to it.
            self.reopen();
            return Err(err);
        }

        prune_archives(&self.config.path, self.config.remain_days);

        self.reopen();
        match self.state {
            State::Open(_) => Ok(()),
            _ => Err(Error::Degraded),
        }
    }

    /// (Re)open the active file at the base path; degrades on failure.
    fn reopen(&mut self) {
        match open_active(&self.config.path) {
            Ok(active) => {
                self.state = State::Open(active);
                self.reported = false;
            }
            Err(err) => {
                self.report(&err);
                self.state = State::Degraded;
            }
        }
    }

    /// Report one diagnostic per failure episode on the fallback channel.
    fn report(&mut self, err: &Error) {
        if self.reported {
            return;
        }
        self.reported = true;
        eprintln!(
            "ember-logger: {err} (path: {})",
            self.config.path.display()
        );
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_active(path: &Path) -> Result<ActiveFile> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let disk_size = file.metadata()?.len();
    Ok(ActiveFile {
        file,
        disk_size,
        opened_on: Local::now().date_naive(),
    })
}

/// Pick the archive name for the file opened on `day`.
///
/// First rotation of a day archives to `<base>.<YYYY-MM-DD>`; repeated
/// same-day rotations append a zero-padded counter (`.001`, `.002`, ...) so
/// lexicographic filename order stays chronological.
fn archive_path(base: &Path, day: NaiveDate) -> PathBuf {
    let mut dated = base.as_os_str().to_os_string();
    dated.push(format!(".{}", day.format("%Y-%m-%d")));

    let first = PathBuf::from(dated.clone());
    if !first.exists() {
        return first;
    }
    for n in 1..=999u32 {
        let mut numbered = dated.clone();
        numbered.push(format!(".{n:03}"));
        let candidate = PathBuf::from(numbered);
        if !candidate.exists() {
            return candidate;
        }
    }
    // 999 same-day rotations exhausted; reuse the last slot.
    dated.push(".999");
    PathBuf::from(dated)
}

/// Delete the oldest archives for `base` until at most `remain` are left.
/// Best-effort: pruning failures never fail a rotation.
fn prune_archives(base: &Path, remain: usize) {
    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(stem) = base.file_name().and_then(|name| name.to_str()) else {
        return;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let prefix = format!("{stem}.");
    let mut archives: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix(&prefix))
                .is_some_and(is_archive_suffix)
        })
        .map(|entry| entry.path())
        .collect();

    // Lexicographic order equals chronological order by construction.
    archives.sort();
    let excess = archives.len().saturating_sub(remain);
    for old in &archives[..excess] {
        let _ = fs::remove_file(old);
    }
}

/// Whether `suffix` looks like `YYYY-MM-DD` or `YYYY-MM-DD.NNN`.
fn is_archive_suffix(suffix: &str) -> bool {
    if suffix.len() < 10 {
        return false;
    }
    let (date, rest) = suffix.split_at(10);
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return false;
    }
    match rest.strip_prefix('.') {
        None => rest.is_empty(),
        Some(counter) => !counter.is_empty() && counter.bytes().all(|b| b.is_ascii_digit()),
    }
}
