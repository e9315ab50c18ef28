//! Mock implementations for testing.
//!
//! Provides test doubles for the wall clock and for widget callbacks.

use chrono::{DateTime, Duration, Utc};
use ipokit_util::Clock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A clock that only moves when told to.
///
/// Clones share the same time, so a clone can be handed to the code under test
/// while the test advances the original.
///
/// # Example
///
/// ```rust
/// use ipokit_test_utils::mocks::ManualClock;
/// use ipokit_util::Clock;
///
/// let clock = ManualClock::new(ipokit_test_utils::fixtures::epoch());
/// let start = clock.now();
/// clock.advance_secs(5);
/// assert_eq!((clock.now() - start).num_seconds(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }

    /// Jump to an absolute time, forwards or backwards.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Counts invocations of a callback handed to a widget.
///
/// # Example
///
/// ```rust
/// use ipokit_test_utils::mocks::CallCounter;
///
/// let counter = CallCounter::new();
/// let mut callback = counter.callback();
/// callback();
/// callback();
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that increments this counter.
    pub fn callback(&self) -> impl FnMut() + Send + 'static {
        let calls = self.calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
