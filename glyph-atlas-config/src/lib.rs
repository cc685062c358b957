//! Configuration system for the glyph-atlas message renderer.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - The `Config` struct and its YAML persistence
//! - Default value functions used by serde
//! - Charset and log level selection types
//! - Typed `ConfigError` variants for I/O, parse and validation failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{CharsetName, LogLevel};
