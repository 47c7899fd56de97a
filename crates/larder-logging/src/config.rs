//! Configuration types for the logging system

use serde::{Deserialize, Serialize};

/// Main logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level (can be overridden by RUST_LOG)
    pub default_level: String,

    /// Console output configuration
    pub console: ConsoleConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            console: ConsoleConfig::default(),
        }
    }
}

impl LogConfig {
    /// Create a config for development (verbose pretty console output)
    pub fn development() -> Self {
        Self {
            default_level: "debug".to_string(),
            console: ConsoleConfig {
                pretty: true,
                ansi: true,
            },
        }
    }

    /// Create a config for production (JSON lines on the console)
    pub fn production() -> Self {
        Self {
            default_level: "info".to_string(),
            console: ConsoleConfig {
                pretty: false,
                ansi: false,
            },
        }
    }

    /// Create a config for testing (minimal output)
    pub fn testing() -> Self {
        Self {
            default_level: "warn".to_string(),
            console: ConsoleConfig {
                pretty: true,
                ansi: false,
            },
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Use pretty (human-readable) format instead of JSON lines
    pub pretty: bool,
    /// Include ANSI colors
    pub ansi: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            pretty: false, // JSON lines by default
            ansi: false,
        }
    }
}
