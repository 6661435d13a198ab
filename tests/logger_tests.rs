//! Integration tests for the logger core
//!
//! These tests verify:
//! - FIFO ordering between producers and the sink
//! - Flush completeness of stop_with_flush
//! - Abandon semantics of stop_without_flush
//! - Fault isolation for failing sink writes
//! - Thread safety under concurrent producers

use linelog::{DropNotice, Logger, LoggerError, LogWriter, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink double that records every line it receives. Optionally sleeps per
/// write (to make abandonment observable) and rejects lines containing a
/// marker substring (to exercise fault isolation).
struct RecordingWriter {
    lines: Arc<Mutex<Vec<String>>>,
    flushes: Arc<AtomicUsize>,
    write_delay: Option<Duration>,
    fail_marker: Option<&'static str>,
}

impl RecordingWriter {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>, Arc<AtomicUsize>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let flushes = Arc::new(AtomicUsize::new(0));
        let writer = Self {
            lines: Arc::clone(&lines),
            flushes: Arc::clone(&flushes),
            write_delay: None,
            fail_marker: None,
        };
        (writer, lines, flushes)
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    fn failing_on(mut self, marker: &'static str) -> Self {
        self.fail_marker = Some(marker);
        self
    }
}

impl LogWriter for RecordingWriter {
    fn write(&mut self, text: &str) -> Result<()> {
        if let Some(delay) = self.write_delay {
            std::thread::sleep(delay);
        }
        if let Some(marker) = self.fail_marker {
            if text.contains(marker) {
                return Err(LoggerError::writer("simulated sink failure"));
            }
        }
        self.lines.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn header(&self) -> Option<&str> {
        None
    }

    fn set_header(&mut self, _header: Option<String>) {}
}

#[test]
fn test_single_thread_ordering() {
    let (writer, lines, _) = RecordingWriter::new();
    let mut logger = Logger::new(writer);

    for i in 0..500 {
        logger.write(format!("message {}", i));
    }
    logger.stop_with_flush().expect("stop_with_flush failed");

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 500);
    for (i, line) in lines.iter().enumerate() {
        assert!(
            line.contains(&format!("message {}.", i)),
            "line {} out of order: {}",
            i,
            line
        );
    }
}

#[test]
fn test_stop_with_flush_completeness() {
    let (writer, lines, flushes) = RecordingWriter::new();
    let mut logger = Logger::new(writer);

    const MAX_LINE: usize = 20000;
    for i in 0..MAX_LINE {
        logger.write(format!("Line number:{}", i));
    }
    logger.stop_with_flush().expect("stop_with_flush failed");

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), MAX_LINE, "every enqueued line must reach the sink");
    assert_eq!(flushes.load(Ordering::Relaxed), 1, "flush exactly once");

    let joined = lines.concat();
    assert!(joined.contains(&format!("Line number:{}", MAX_LINE - 1)));
}

#[test]
fn test_stop_without_flush_abandons_queue() {
    let (writer, lines, flushes) = RecordingWriter::new();
    let writer = writer.with_delay(Duration::from_millis(2));
    let mut logger = Logger::new(writer);

    const MAX_LINE: usize = 5000;
    for i in 0..MAX_LINE {
        logger.write(format!("Line number:{}", i));
    }
    logger.stop_without_flush();

    // Give the detached worker time to observe the signal and exit.
    std::thread::sleep(Duration::from_millis(300));

    let lines = lines.lock().unwrap();
    assert!(lines.len() <= MAX_LINE);
    assert_eq!(flushes.load(Ordering::Relaxed), 0, "flush must never run");

    // With a slow sink the tail of the queue cannot have been drained.
    let joined = lines.concat();
    assert!(
        !joined.contains(&format!("Line number:{}", MAX_LINE - 1)),
        "last line should have been abandoned"
    );
}

#[test]
fn test_drop_without_stop_drains_queue() {
    let (writer, lines, _) = RecordingWriter::new();
    let logger = Logger::new(writer);

    const MAX_LINE: usize = 1000;
    for i in 0..MAX_LINE {
        logger.write(format!("Line number:{}", i));
    }

    // No explicit stop: dropping the logger must drain every queued line
    // before the worker is released.
    drop(logger);

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), MAX_LINE, "drop must drain the whole queue");
    assert!(lines
        .last()
        .unwrap()
        .contains(&format!("Line number:{}", MAX_LINE - 1)));
}

#[test]
fn test_failing_line_does_not_halt_pipeline() {
    let (writer, lines, _) = RecordingWriter::new();
    let writer = writer.failing_on("poison");

    let notices = Arc::new(Mutex::new(Vec::new()));
    let notices_clone = Arc::clone(&notices);
    let mut logger = Logger::builder()
        .on_drop(Arc::new(move |notice: &DropNotice| {
            notices_clone.lock().unwrap().push(notice.line.clone());
        }))
        .build(writer);

    logger.write("before the bad line");
    logger.write("a poison pill");
    logger.write("after the bad line");
    logger.stop_with_flush().expect("stop_with_flush failed");

    let joined = lines.lock().unwrap().concat();
    assert!(joined.contains("before the bad line"));
    assert!(joined.contains("after the bad line"));
    assert!(!joined.contains("poison"));

    let notices = notices.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("poison"));
    assert_eq!(logger.dropped_count(), 1);
}

#[test]
fn test_concurrent_producers_all_delivered_in_per_thread_order() {
    let (writer, lines, _) = RecordingWriter::new();
    let logger = Arc::new(Logger::new(writer));

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                logger_clone.write(format!("thread {} - message {}", thread_id, i));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut logger = Arc::try_unwrap(logger)
        .map_err(|_| "logger still shared")
        .unwrap();
    logger.stop_with_flush().expect("stop_with_flush failed");

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 500);

    // Submission order is preserved per producer thread.
    for thread_id in 0..5 {
        let tag = format!("thread {} - message ", thread_id);
        let seen: Vec<&String> = lines.iter().filter(|l| l.contains(&tag)).collect();
        assert_eq!(seen.len(), 100);
        for (i, line) in seen.iter().enumerate() {
            assert!(
                line.contains(&format!("{}{}.", tag, i)),
                "thread {} message {} out of order: {}",
                thread_id,
                i,
                line
            );
        }
    }
}

#[test]
fn test_lines_are_timestamped_and_terminated() {
    let (writer, lines, _) = RecordingWriter::new();
    let mut logger = Logger::new(writer);

    logger.write("payload");
    logger.stop_with_flush().expect("stop_with_flush failed");

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];

    // "<yyyy-MM-dd HH:mm:ss:fff> <text>.<newline>"
    assert!(line.ends_with(&format!("payload.{}", linelog::LINE_TERMINATOR)));
    let timestamp = &line[..23];
    assert_eq!(timestamp.as_bytes()[4], b'-');
    assert_eq!(timestamp.as_bytes()[10], b' ');
    assert_eq!(timestamp.as_bytes()[13], b':');
    assert_eq!(timestamp.as_bytes()[19], b':');
}

#[test]
fn test_metrics_track_enqueued_and_forwarded() {
    let (writer, _, _) = RecordingWriter::new();
    let mut logger = Logger::new(writer);

    for i in 0..50 {
        logger.write(format!("m{}", i));
    }
    logger.stop_with_flush().expect("stop_with_flush failed");

    let metrics = logger.metrics();
    assert_eq!(metrics.enqueued_count(), 50);
    assert_eq!(metrics.forwarded_count(), 50);
    assert_eq!(metrics.dropped_count(), 0);
}
