//! Line formatting helper
//!
//! Every submitted text is turned into a single immutable string at
//! submission time: `"<yyyy-MM-dd HH:mm:ss:fff> <text>.<newline>"`.
//! The worker and the sinks only ever see pre-formatted lines.

use chrono::{DateTime, Local};

/// Platform line terminator appended to every formatted line.
pub const LINE_TERMINATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Format a log line with its capture timestamp at millisecond precision.
#[must_use]
pub fn format_line(timestamp: &DateTime<Local>, text: &str) -> String {
    format!(
        "{} {}.{}",
        timestamp.format("%Y-%m-%d %H:%M:%S:%3f"),
        text,
        LINE_TERMINATOR
    )
}
