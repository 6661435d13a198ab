//! Main logger implementation

use super::{
    clock::{Clock, SystemClock},
    error::{LoggerError, Result},
    format::format_line,
    metrics::LoggerMetrics,
    writer::LogWriter,
};
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default drain timeout when the logger is dropped without an explicit stop
///
/// `stop_with_flush` itself waits unboundedly; this timeout only bounds the
/// implicit drain performed by `Drop`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A line the worker failed to forward to the sink, together with the sink
/// error. Reported on the diagnostics channel; the line is not retried.
#[derive(Debug)]
pub struct DropNotice {
    pub line: String,
    pub error: LoggerError,
}

/// Callback invoked from the worker thread whenever a line is dropped
/// after a sink write failure.
pub type DropCallback = Arc<dyn Fn(&DropNotice) + Send + Sync>;

/// Asynchronous, thread-safe line logger.
///
/// `write` may be called concurrently from any number of threads; a single
/// background worker drains the queue and forwards lines to the bound sink
/// in submission order. A logger is single-use: after either stop mode it
/// must not be restarted, and further `write` calls are silently ignored.
pub struct Logger {
    sender: Option<Sender<String>>,
    hard_stop: Sender<()>,
    worker: Option<thread::JoinHandle<Box<dyn LogWriter>>>,
    clock: Arc<dyn Clock>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger bound to a sink and spawn its worker thread.
    #[must_use]
    pub fn new(writer: impl LogWriter + 'static) -> Self {
        LoggerBuilder::new().build(writer)
    }

    fn spawn(
        writer: Box<dyn LogWriter>,
        clock: Arc<dyn Clock>,
        on_drop: Option<DropCallback>,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let (hard_stop, hard_stop_rx) = bounded(1);
        let metrics = Arc::new(LoggerMetrics::new());
        let metrics_clone = Arc::clone(&metrics);

        let worker = thread::spawn(move || {
            Self::drain_lines(&receiver, &hard_stop_rx, writer, &metrics_clone, on_drop)
        });

        Self {
            sender: Some(sender),
            hard_stop,
            worker: Some(worker),
            clock,
            metrics,
        }
    }

    /// Worker loop: forward queued lines to the sink in FIFO order until a
    /// stop fires. Returns the sink so `stop_with_flush` can flush it after
    /// the thread has exited.
    ///
    /// There is no poll interval: the select blocks until a line arrives or
    /// the hard stop fires. The line channel disconnecting with an empty
    /// queue is the soft stop, so a soft stop always drains to empty.
    fn drain_lines(
        lines: &Receiver<String>,
        hard_stop: &Receiver<()>,
        mut writer: Box<dyn LogWriter>,
        metrics: &Arc<LoggerMetrics>,
        on_drop: Option<DropCallback>,
    ) -> Box<dyn LogWriter> {
        loop {
            select! {
                recv(lines) -> msg => match msg {
                    Ok(line) => match writer.write(&line) {
                        Ok(()) => {
                            metrics.record_forwarded();
                        }
                        // One bad line must not halt the pipeline: report it
                        // on the diagnostics channel and continue.
                        Err(error) => {
                            metrics.record_dropped();
                            let notice = DropNotice { line, error };
                            match &on_drop {
                                Some(callback) => callback(&notice),
                                None => eprintln!(
                                    "[LOGGER ERROR] Dropped line after sink write failure: {}",
                                    notice.error
                                ),
                            }
                        }
                    },
                    // All senders gone and queue empty: drained.
                    Err(_) => break,
                },
                recv(hard_stop) -> _ => break,
            }
        }
        writer
    }

    /// Submit a line. Captures the current timestamp, formats the line and
    /// enqueues it; returns immediately without touching I/O. Safe to call
    /// concurrently from any thread. Calls after either stop mode are
    /// ignored.
    pub fn write(&self, text: impl AsRef<str>) {
        if let Some(ref sender) = self.sender {
            let line = format_line(&self.clock.now(), text.as_ref());
            if sender.send(line).is_ok() {
                self.metrics.record_enqueued();
            }
        }
    }

    /// Soft stop: close the queue, block until the worker has forwarded
    /// every enqueued line and exited, then flush the sink.
    ///
    /// The wait is unbounded. A sink flush failure propagates to the
    /// caller; every line enqueued before this call has already reached
    /// the sink by then.
    pub fn stop_with_flush(&mut self) -> Result<()> {
        drop(self.sender.take());
        if let Some(handle) = self.worker.take() {
            let mut writer = handle.join().map_err(|_| LoggerError::WorkerPanicked)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Hard stop: signal the worker to exit at its next opportunity and
    /// return without waiting. Queued-but-undrained lines are abandoned;
    /// whether lines already in flight reach the sink is race-dependent.
    /// The sink is never flushed.
    pub fn stop_without_flush(&mut self) {
        let _ = self.hard_stop.try_send(());
        drop(self.sender.take());
        // Detach the worker; it exits on its own once it observes the signal.
        drop(self.worker.take());
    }

    /// Get the number of lines dropped after sink write failures.
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability.
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Close the queue so the worker drains remaining lines and exits.
        drop(self.sender.take());

        if let Some(handle) = self.worker.take() {
            let start = std::time::Instant::now();

            loop {
                if handle.is_finished() {
                    match handle.join() {
                        Ok(mut writer) => {
                            if let Err(e) = writer.flush() {
                                eprintln!("[LOGGER ERROR] Failed to flush during drop: {}", e);
                            }
                        }
                        Err(e) => {
                            eprintln!("[LOGGER ERROR] Worker thread panicked: {:?}", e);
                        }
                    }
                    break;
                }

                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    let _ = self.hard_stop.try_send(());
                    eprintln!(
                        "[LOGGER WARNING] Worker did not drain within {:?}. \
                         Some lines may be lost.",
                        DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }

                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```no_run
/// use linelog::prelude::*;
/// use linelog::writers::RotatingFileWriter;
///
/// let writer = RotatingFileWriter::new("/var/log/myapp", "app").unwrap();
/// let mut logger = Logger::builder().build(writer);
/// logger.write("service started");
/// logger.stop_with_flush().unwrap();
/// ```
pub struct LoggerBuilder {
    clock: Arc<dyn Clock>,
    on_drop: Option<DropCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            on_drop: None,
        }
    }

    /// Replace the time source used for timestamp capture
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set a callback for drop notices
    ///
    /// Invoked from the worker thread whenever a line is dropped after a
    /// sink write failure. Without a callback, notices go to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_drop(mut self, callback: DropCallback) -> Self {
        self.on_drop = Some(callback);
        self
    }

    /// Bind the sink and start the logger
    pub fn build(self, writer: impl LogWriter + 'static) -> Logger {
        Logger::spawn(Box::new(writer), self.clock, self.on_drop)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
