//! Rendering of a level, optional color escapes, and a message into one
//! byte record.

use crate::level::Level;

/// ANSI reset appended after the message when color is enabled.
pub(crate) const COLOR_RESET: &str = "\x1b[0m";

/// Render one log record.
///
/// Produces `LABEL message\n`, wrapped in the level's ANSI escape prefix and
/// a reset suffix when `color` is enabled. The message is truncated (on a
/// UTF-8 character boundary) so the whole record fits in `max_record` bytes,
/// bounding buffer pressure; oversized messages are never an error.
///
/// Pure function: no shared state, safe to call concurrently from any thread.
pub fn format_record(level: Level, color: bool, message: &str, max_record: usize) -> Vec<u8> {
    let escape = if color { level.color() } else { None };
    let overhead = level.label().len()
        + 2 // separator space and trailing newline
        + escape.map_or(0, |seq| seq.len() + COLOR_RESET.len());
    let message = truncate_on_boundary(message, max_record.saturating_sub(overhead));

    let mut record = Vec::with_capacity(overhead + message.len());
    if let Some(seq) = escape {
        record.extend_from_slice(seq.as_bytes());
    }
    record.extend_from_slice(level.label().as_bytes());
    record.push(b' ');
    record.extend_from_slice(message.as_bytes());
    if escape.is_some() {
        record.extend_from_slice(COLOR_RESET.as_bytes());
    }
    record.push(b'\n');
    record
}

/// Truncate `s` to at most `max` bytes without splitting a character.
fn truncate_on_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
