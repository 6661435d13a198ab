//! Injectable time source
//!
//! Both the logger (timestamp capture on `write`) and the rotating file
//! writer (day-boundary detection) read the current time through this trait,
//! so tests can drive timestamps and rotation deterministically.

use chrono::{DateTime, Local};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Default clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_current() {
        let clock = SystemClock;
        let before = Local::now();
        let now = clock.now();
        let after = Local::now();
        assert!(before <= now && now <= after);
    }
}
