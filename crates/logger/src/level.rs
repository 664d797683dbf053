//! Log severity levels and the enabled/disabled threshold policy.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Log severity, totally ordered from most to least verbose.
///
/// The ordering is `Verbose < Debug < Info < Warn < Error < Fatal < Silent`.
/// A logger's threshold drops every record strictly below it before any
/// formatting or I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Everything, including chatter too fine-grained for `Debug`.
    Verbose = 0,
    /// Diagnostic detail for developers.
    Debug = 1,
    /// Normal operational messages.
    Info = 2,
    /// Something unexpected that the process can tolerate.
    Warn = 3,
    /// An operation failed.
    Error = 4,
    /// The process is about to fall over.
    Fatal = 5,
    /// Threshold sentinel disabling all output. Not a record severity:
    /// emitting *at* `Silent` is filtered, never written.
    Silent = 6,
}

impl Level {
    /// Convert from a raw integer, clamping out-of-range values to the
    /// nearest valid bound.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Verbose,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Fatal,
            _ => Level::Silent,
        }
    }

    /// Unpadded level name, as accepted by [`Level::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Silent => "SILENT",
        }
    }

    /// Fixed-width record label, padded so columns align across levels.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Verbose => "VERB ",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warn => "WARN ",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Silent => "     ",
        }
    }

    /// ANSI escape prefix for this level, if it has one.
    ///
    /// `Verbose` records are uncolored. `Fatal` renders white-on-red so it
    /// stands out even in a scrolling terminal.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Level::Verbose | Level::Silent => None,
            Level::Debug => Some("\x1b[37m"),
            Level::Info => Some("\x1b[1;32m"),
            Level::Warn => Some("\x1b[1;33m"),
            Level::Error => Some("\x1b[1;31m"),
            Level::Fatal => Some("\x1b[41;37m"),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim() {
            s if s.eq_ignore_ascii_case("verbose") => Level::Verbose,
            s if s.eq_ignore_ascii_case("debug") => Level::Debug,
            s if s.eq_ignore_ascii_case("info") => Level::Info,
            s if s.eq_ignore_ascii_case("warn") => Level::Warn,
            s if s.eq_ignore_ascii_case("error") => Level::Error,
            s if s.eq_ignore_ascii_case("fatal") => Level::Fatal,
            s if s.eq_ignore_ascii_case("silent") => Level::Silent,
            other => {
                return Err(Error::Configuration(format!(
                    "unknown log level: {other:?}"
                )));
            }
        };
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        assert!(Level::Verbose < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Silent);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(Level::from_u8(0), Level::Verbose);
        assert_eq!(Level::from_u8(6), Level::Silent);
        assert_eq!(Level::from_u8(7), Level::Silent);
        assert_eq!(Level::from_u8(u8::MAX), Level::Silent);
    }

    #[test]
    fn labels_share_a_width() {
        for level in [
            Level::Verbose,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
        ] {
            assert_eq!(level.label().len(), 5, "label for {level}");
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" Silent ".parse::<Level>().unwrap(), Level::Silent);
        assert!("loud".parse::<Level>().is_err());
    }
}
