//! Command handlers for the ipokit CLI.
//!
//! Each non-interactive subcommand exercises one widget's logic without a
//! terminal UI.

pub mod config;
pub mod countdown;
pub mod faq;
pub mod validate;

pub use config::*;
pub use countdown::*;
pub use faq::*;
pub use validate::*;
