//! Call-site convenience macros routing through the default logger.
//!
//! Each macro decorates the message with ` [file:line]` before it reaches
//! the formatter, and swallows the emit status: logging must never steer the
//! caller's control flow.

/// Emit at an explicit level via the default logger, tagging the call site.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {{
        let _ = $crate::default_logger().emit(
            $level,
            format_args!("{} [{}:{}]", format_args!($($arg)*), file!(), line!()),
        );
    }};
}

/// Emit a VERBOSE record via the default logger.
#[macro_export]
macro_rules! logv {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Verbose, $($arg)*) };
}

/// Emit a DEBUG record via the default logger.
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Debug, $($arg)*) };
}

/// Emit an INFO record via the default logger.
#[macro_export]
macro_rules! logi {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Info, $($arg)*) };
}

/// Emit a WARN record via the default logger.
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Warn, $($arg)*) };
}

/// Emit an ERROR record via the default logger.
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Error, $($arg)*) };
}

/// Emit a FATAL record via the default logger.
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => { $crate::log_at!($crate::Level::Fatal, $($arg)*) };
}
