//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the hud crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "hud=trace",
            LogLevel::Debug => "hud=debug",
            LogLevel::Info => "hud=info",
            LogLevel::Warn => "hud=warn",
            LogLevel::Error => "hud=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
