//! Logger metrics for observability
//!
//! Counters for monitoring logger health: lines accepted into the queue,
//! lines forwarded to the sink, and lines dropped after a sink failure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// Dropped lines are only observable here and through the drop callback;
/// `write` itself never surfaces sink failures to the caller.
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines accepted into the queue by `write`
    enqueued_count: AtomicU64,

    /// Lines successfully forwarded to the sink
    forwarded_count: AtomicU64,

    /// Lines dropped because the sink failed to write them
    dropped_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued_count: AtomicU64::new(0),
            forwarded_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
        }
    }

    /// Get the number of lines accepted into the queue
    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued_count.load(Ordering::Relaxed)
    }

    /// Get the number of lines forwarded to the sink
    #[inline]
    pub fn forwarded_count(&self) -> u64 {
        self.forwarded_count.load(Ordering::Relaxed)
    }

    /// Get the number of lines dropped after a sink write failure
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Record a line accepted into the queue
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a line forwarded to the sink
    #[inline]
    pub fn record_forwarded(&self) -> u64 {
        self.forwarded_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped line
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0) of lines that reached
    /// the worker. Returns 0.0 if nothing has been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.forwarded_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
