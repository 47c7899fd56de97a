//! # Larder Logging
//!
//! Tracing setup for Larder binaries and tests.
//!
//! Emits JSON lines by default (for log aggregation) with a pretty
//! human-readable mode for development. The filter honors `RUST_LOG` and
//! falls back to the configured default level.
//!
//! # Quick Start
//!
//! ```ignore
//! use larder_logging::{LarderSubscriberBuilder, LogConfig};
//!
//! // Simple setup with defaults (JSON lines to console)
//! LarderSubscriberBuilder::new().init();
//!
//! // Development mode with pretty human-readable output
//! LarderSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init();
//! ```

pub mod config;

pub use config::{ConsoleConfig, LogConfig};

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for the Larder tracing subscriber
#[derive(Debug, Clone)]
pub struct LarderSubscriberBuilder {
    config: LogConfig,
}

impl LarderSubscriberBuilder {
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the default level (still overridable via RUST_LOG)
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.default_level))
    }

    /// Initialize the subscriber globally
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been set.
    pub fn init(self) {
        let registry = Registry::default().with(self.env_filter());

        if self.config.console.pretty {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(self.config.console.ansi)
                        .with_target(true),
                )
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
                .init();
        }
    }

    /// Initialize the subscriber globally, ignoring an already-set one
    ///
    /// Used by tests, which may race to install the subscriber.
    pub fn try_init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let registry = Registry::default().with(self.env_filter());

        if self.config.console.pretty {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(self.config.console.ansi)
                        .with_target(true),
                )
                .try_init()
                .map_err(Into::into)
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
                .try_init()
                .map_err(Into::into)
        }
    }
}

impl Default for LarderSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize with default configuration (JSON lines, info level)
pub fn init_default() {
    LarderSubscriberBuilder::new().init();
}

/// Initialize for development (pretty output, debug level)
pub fn init_development() {
    LarderSubscriberBuilder::new()
        .with_config(LogConfig::development())
        .init();
}

/// Initialize for tests; safe to call from several tests at once
pub fn init_testing() {
    let _ = LarderSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .try_init();
}
