//! RAII-based timing for measuring and logging how long UI work takes.
//!
//! # Example
//!
//! ```rust,ignore
//! use ipokit_util::timing::TimingGuard;
//!
//! fn draw(frame: &mut Frame) {
//!     let _timing = TimingGuard::frame();
//!     // ... render widgets ...
//!     // Duration is logged when _timing is dropped
//! }
//! ```

use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// RAII guard that measures and logs the duration of an operation.
///
/// Frames are expected to be fast, so the default thresholds are much lower
/// than for I/O-bound work.
pub struct TimingGuard {
    operation_type: &'static str,
    operation_name: String,
    start: Instant,
    /// Minimum duration to log at debug level (below this uses trace).
    debug_threshold_ms: u64,
    /// Minimum duration to log at warn level.
    warn_threshold_ms: u64,
}

impl TimingGuard {
    /// Create a new timing guard.
    pub fn new(operation_type: &'static str, operation_name: impl Into<String>) -> Self {
        Self {
            operation_type,
            operation_name: operation_name.into(),
            start: Instant::now(),
            debug_threshold_ms: 16, // one frame at 60fps
            warn_threshold_ms: 100,
        }
    }

    /// Create a timing guard for drawing one frame.
    pub fn frame() -> Self {
        Self::new("frame", "draw")
    }

    /// Create a timing guard for a single widget operation.
    pub fn widget(name: impl Into<String>) -> Self {
        Self::new("widget", name)
    }

    /// Set the threshold for debug-level logging (in milliseconds).
    pub fn with_debug_threshold(mut self, ms: u64) -> Self {
        self.debug_threshold_ms = ms;
        self
    }

    /// Set the threshold for warn-level logging (in milliseconds).
    pub fn with_warn_threshold(mut self, ms: u64) -> Self {
        self.warn_threshold_ms = ms;
        self
    }

    /// Get the elapsed time so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;

        if duration_ms >= self.warn_threshold_ms {
            warn!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration_ms,
                "Slow UI operation"
            );
        } else if duration_ms >= self.debug_threshold_ms {
            debug!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration_ms,
                "UI operation completed"
            );
        } else {
            trace!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration_ms,
                "UI operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_timing_guard_basic() {
        let guard = TimingGuard::new("test", "basic");
        sleep(Duration::from_millis(10));
        assert!(guard.elapsed_ms() >= 10);
        drop(guard);
    }

    #[test]
    fn test_timing_guard_frame() {
        let guard = TimingGuard::frame().with_debug_threshold(1).with_warn_threshold(1000);
        sleep(Duration::from_millis(2));
        assert!(guard.elapsed() >= Duration::from_millis(2));
    }
}
