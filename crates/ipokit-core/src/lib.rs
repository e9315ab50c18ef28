//! Core types for ipokit.
//!
//! This crate holds the pieces shared by the showcase binary and any embedding
//! application: layered JSONC configuration and the error types it produces.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ConfigError, CoreError, CoreResult};
