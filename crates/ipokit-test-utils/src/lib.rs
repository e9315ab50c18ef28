//! Testing utilities, fixtures, and mocks for ipokit.
//!
//! This crate provides common testing infrastructure used across the ipokit workspace:
//!
//! - **Fixtures**: FAQ data, fixed instants and temporary config directories
//! - **Mocks**: A manually advanced clock and callback counters
//! - **Assertions**: Rendering widgets into a `TestBackend` and diff-based string checks
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ipokit_test_utils::{fixtures, mocks::ManualClock};
//! use ipokit_util::Clock;
//! use ipokit_widgets::CountdownTimer;
//!
//! let clock = ManualClock::new(fixtures::epoch());
//! let mut timer = CountdownTimer::new(clock.now() + chrono::Duration::seconds(3));
//! timer.mount(clock.now());
//! clock.advance_secs(1);
//! timer.tick(clock.now());
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used items
pub use assertions::{assert_buffer_contains, assert_strings_equal, render_to_string};
pub use fixtures::{epoch, sample_faqs, TestProject};
pub use mocks::{CallCounter, ManualClock};
