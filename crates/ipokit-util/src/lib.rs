//! Shared utilities for ipokit.
//!
//! This crate provides common utilities used across the ipokit workspace:
//! - Error type for construction-time failures
//! - ULID-based identifier generation
//! - Logging setup with tracing
//! - Wall-clock abstraction for deterministic tests
//! - Cancellable timer scheduling for single-threaded UI loops
//! - Debounce and throttle helpers
//! - RAII-based timing for operation measurement

pub mod clock;
pub mod debounce;
pub mod error;
pub mod id;
pub mod log;
pub mod timer;
pub mod timing;

pub use clock::{Clock, SystemClock};
pub use debounce::{Debouncer, Throttle};
pub use error::{compile_pattern, Error, Result};
pub use id::{IdPrefix, Identifier};
pub use timer::{Scheduler, TimerId};
pub use timing::TimingGuard;
