//! File sink configuration.

use std::path::PathBuf;

/// Default in-memory buffer capacity: 16 KiB.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 1 << 14;

/// Default maximum active file size before rotation: 16 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1 << 24;

/// Default number of retained archives.
pub const DEFAULT_REMAIN_DAYS: usize = 1;

/// Configuration for a file-backed sink.
///
/// `path` is the base path of the active log file; rotation archives it as
/// `<path>.<YYYY-MM-DD>` (with a numeric suffix for repeated same-day
/// rotations) and retention keeps at most `remain_days` archives.
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Base path of the active log file.
    pub path: PathBuf,
    /// Maximum active file size in bytes; exceeding it triggers rotation.
    pub max_file_size: u64,
    /// Maximum number of archived files kept for this base path.
    pub remain_days: usize,
    /// Force a flush-and-sync after every append, trading throughput for
    /// crash-safety.
    pub fsync: bool,
    /// In-memory buffer capacity in bytes. Also bounds the size of a single
    /// formatted record.
    pub max_buffer_size: usize,
}

impl FileSinkConfig {
    /// Configuration for `path` with all defaults.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            remain_days: DEFAULT_REMAIN_DAYS,
            fsync: false,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }

    /// Fluent builder for `path`.
    pub fn builder(path: impl Into<PathBuf>) -> FileSinkConfigBuilder {
        FileSinkConfigBuilder {
            config: Self::new(path),
        }
    }
}

/// Builder for [`FileSinkConfig`].
#[derive(Debug, Clone)]
pub struct FileSinkConfigBuilder {
    config: FileSinkConfig,
}

impl FileSinkConfigBuilder {
    /// Maximum active file size in bytes before rotation.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Maximum number of archived files kept for the base path.
    pub fn remain_days(mut self, days: usize) -> Self {
        self.config.remain_days = days;
        self
    }

    /// Force a flush-and-sync after every append.
    pub fn fsync(mut self, on: bool) -> Self {
        self.config.fsync = on;
        self
    }

    /// In-memory buffer capacity in bytes.
    pub fn max_buffer_size(mut self, bytes: usize) -> Self {
        self.config.max_buffer_size = bytes;
        self
    }

    /// Finish the build.
    pub fn build(self) -> FileSinkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = FileSinkConfig::new("app.log");
        assert_eq!(config.max_buffer_size, 16 * 1024);
        assert_eq!(config.max_file_size, 16 * 1024 * 1024);
        assert_eq!(config.remain_days, 1);
        assert!(!config.fsync);
    }

    #[test]
    fn builder_overrides_stick() {
        let config = FileSinkConfig::builder("app.log")
            .max_file_size(100)
            .remain_days(3)
            .fsync(true)
            .max_buffer_size(64)
            .build();
        assert_eq!(config.max_file_size, 100);
        assert_eq!(config.remain_days, 3);
        assert!(config.fsync);
        assert_eq!(config.max_buffer_size, 64);
    }
}
