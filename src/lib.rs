//! # linelog
//!
//! An asynchronous, thread-safe line logger with a pluggable sink and
//! day-rotating file output.
//!
//! ## Features
//!
//! - **Fire and Forget**: `write` enqueues and returns; a single background
//!   worker forwards lines to the sink in submission order
//! - **Two Stop Modes**: `stop_with_flush` drains everything and flushes,
//!   `stop_without_flush` abandons queued lines immediately
//! - **Pluggable Sinks**: anything implementing `LogWriter` can be bound;
//!   a day-rotating file writer ships in the box
//! - **Thread Safe**: designed for concurrent producers
//!
//! ## Example
//!
//! ```no_run
//! use linelog::prelude::*;
//! use linelog::writers::RotatingFileWriter;
//!
//! let writer = RotatingFileWriter::new("/var/log/myapp", "app")
//!     .unwrap()
//!     .with_header("Timestamp Data");
//! let mut logger = Logger::new(writer);
//!
//! logger.write("service started");
//! logger.stop_with_flush().unwrap();
//! ```

pub mod core;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        format_line, Clock, DropCallback, DropNotice, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, LogWriter, Result, SystemClock, DEFAULT_SHUTDOWN_TIMEOUT, LINE_TERMINATOR,
    };
    pub use crate::writers::RotatingFileWriter;
}

pub use crate::core::{
    format_line, Clock, DropCallback, DropNotice, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, LogWriter, Result, SystemClock, DEFAULT_SHUTDOWN_TIMEOUT, LINE_TERMINATOR,
};
pub use crate::writers::RotatingFileWriter;
