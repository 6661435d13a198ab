//! Sink contract for log output destinations
//!
//! The logger knows nothing about files; it forwards pre-formatted lines to
//! anything implementing this trait. The sink is moved into the worker
//! thread and owned exclusively there, so `Send` is required but `Sync` is
//! not.

use super::error::Result;

pub trait LogWriter: Send {
    /// Append already-formatted text to the destination. The text carries
    /// its own line terminator; implementations must not add one.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Push any buffered bytes to durable storage.
    fn flush(&mut self) -> Result<()>;

    /// Header written once at the start of every newly created destination.
    /// `None` means no header is written.
    fn header(&self) -> Option<&str>;

    /// Replace the configured header. Takes effect for destinations created
    /// after the call.
    fn set_header(&mut self, header: Option<String>);
}
