//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod format;
pub mod logger;
pub mod metrics;
pub mod writer;

pub use clock::{Clock, SystemClock};
pub use error::{LoggerError, Result};
pub use format::{format_line, LINE_TERMINATOR};
pub use logger::{DropCallback, DropNotice, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use writer::LogWriter;
