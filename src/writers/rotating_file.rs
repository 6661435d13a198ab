//! Day-rotating file writer
//!
//! Appends pre-formatted lines to `<folder>/<prefix>-<yyyyMMdd>.log`. The
//! destination is keyed by the current date as seen by an injectable clock;
//! the first write that observes a new day flushes and replaces the open
//! handle. A configured header is written as the first line of every
//! destination that did not previously exist on disk.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{LoggerError, Result};
use crate::core::format::LINE_TERMINATOR;
use crate::core::writer::LogWriter;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct RotatingFileWriter {
    folder: PathBuf,
    prefix: String,
    header: Option<String>,
    clock: Arc<dyn Clock>,
    // At most one destination handle is open at a time.
    writer: Option<BufWriter<File>>,
    current_path: Option<PathBuf>,
}

impl RotatingFileWriter {
    /// Create a writer for the given folder and filename prefix. The folder
    /// is created if it does not exist; no file is opened until the first
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created.
    pub fn new(folder: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let folder = folder.into();
        fs::create_dir_all(&folder).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("failed to create '{}'", folder.display()),
                e,
            )
        })?;

        Ok(Self {
            folder,
            prefix: prefix.into(),
            header: None,
            clock: Arc::new(SystemClock),
            writer: None,
            current_path: None,
        })
    }

    /// Set the header written at the top of every newly created destination
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Replace the time source used for day-boundary detection
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the configured folder
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the configured filename prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Destination path for today as seen by the clock
    fn destination_path(&self) -> PathBuf {
        let date = self.clock.now().format("%Y%m%d");
        self.folder.join(format!("{}-{}.log", self.prefix, date))
    }

    /// Make sure the open handle matches today's destination, rotating the
    /// old one out if the day has changed since the previous write.
    fn ensure_destination(&mut self) -> Result<()> {
        let path = self.destination_path();

        if self.writer.is_some() && self.current_path.as_deref() == Some(path.as_path()) {
            return Ok(());
        }

        // Day changed (or first write): flush and close the stale handle
        // before opening the new destination.
        if let Some(mut old) = self.writer.take() {
            old.flush().map_err(|e| {
                LoggerError::rotation(
                    self.current_path
                        .as_deref()
                        .unwrap_or(&path)
                        .display()
                        .to_string(),
                    format!("failed to flush before rotation: {}", e),
                )
            })?;
        }

        let fresh = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_writer(
                    path.display().to_string(),
                    format!("failed to open: {}", e),
                )
            })?;
        let mut writer = BufWriter::new(file);

        // Header goes only into destinations we created; re-opening an
        // existing same-day file appends without re-writing it.
        if fresh {
            if let Some(ref header) = self.header {
                writer
                    .write_all(header.as_bytes())
                    .and_then(|()| writer.write_all(LINE_TERMINATOR.as_bytes()))
                    .map_err(|e| {
                        LoggerError::file_writer(
                            path.display().to_string(),
                            format!("failed to write header: {}", e),
                        )
                    })?;
            }
        }

        self.current_path = Some(path);
        self.writer = Some(writer);
        Ok(())
    }
}

impl LogWriter for RotatingFileWriter {
    fn write(&mut self, text: &str) -> Result<()> {
        self.ensure_destination()?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("file writer not initialized"))?;

        writer.write_all(text.as_bytes()).map_err(|e| {
            LoggerError::file_writer(
                self.current_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                format!("failed to write line: {}", e),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_writer(
                    self.current_path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    format!("failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    fn set_header(&mut self, header: Option<String>) {
        self.header = header;
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        // Best effort flush - ignore errors during drop
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
