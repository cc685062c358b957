//! Configuration types and enums.

use serde::{Deserialize, Serialize};

/// Optional charset that can be added to the atlas.
///
/// Latin is always rasterized; listing it is accepted and has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharsetName {
    Latin,
    Greek,
    Cyrillic,
}

impl CharsetName {
    /// Lowercase name, as written in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            CharsetName::Latin => "latin",
            CharsetName::Greek => "greek",
            CharsetName::Cyrillic => "cyrillic",
        }
    }
}

/// Log level for the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
