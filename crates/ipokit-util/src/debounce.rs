//! Rate limiting for callbacks driven by the UI loop.
//!
//! Both helpers are polled with the current time rather than spawning timers,
//! matching the rest of the single-threaded widget model.

use chrono::{DateTime, Utc};
use std::time::Duration;

fn delta(d: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(d.as_millis().min(i64::MAX as u128) as i64)
}

/// Delays an action until calls have stopped for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a call, pushing the deadline out.
    pub fn call(&mut self, now: DateTime<Utc>) {
        self.deadline = now.checked_add_signed(delta(self.delay));
    }

    /// Returns `true` exactly once after the quiet period has elapsed.
    pub fn ready(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a call is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any pending call.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Allows an action at most once per `interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<DateTime<Utc>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns `true` if the action may run now, recording the attempt.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> bool {
        let allowed = match self.last {
            Some(last) => now - last >= delta(self.interval),
            None => true,
        };
        if allowed {
            self.last = Some(now);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(ms)
    }

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let mut d = Debouncer::new(Duration::from_millis(300));
        d.call(at(0));
        d.call(at(200));
        assert!(!d.ready(at(400)));
        assert!(d.ready(at(500)));
        assert!(!d.ready(at(600)));
    }

    #[test]
    fn test_debounce_cancel() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.call(at(0));
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.ready(at(1000)));
    }

    #[test]
    fn test_throttle() {
        let mut t = Throttle::new(Duration::from_millis(100));
        assert!(t.try_acquire(at(0)));
        assert!(!t.try_acquire(at(50)));
        assert!(t.try_acquire(at(100)));
        assert!(!t.try_acquire(at(150)));
    }
}
