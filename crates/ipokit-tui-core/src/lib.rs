//! Core types for ipokit terminal widgets.
//!
//! This crate provides foundational types shared across the TUI crates:
//! - Theme system with brand color definitions
//! - Event handling (terminal input plus periodic ticks)

pub mod event;
pub mod theme;

pub use event::{is_quit, Event, EventHandler, EventLoopHandle, DEFAULT_TICK_RATE};
pub use theme::Theme;
