// Library exports for testing and the binary

pub mod app;
pub mod cli;
pub mod debug;
pub mod render;

pub use app::{RenderOptions, RenderSummary, run};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
