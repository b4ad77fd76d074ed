//! # Process-wide logging configuration.
//!
//! [`Config`] holds the facility defaults consulted when sinks and loggers
//! are created:
//! - `format`: default wire encoding for new pipe sinks;
//! - `level`: severity gate for the primary stderr mirror;
//! - `stderr`: whether the plaintext mirror is enabled at all.
//!
//! ## Field semantics
//! Pipe sinks are offered records **independent** of `level`: a
//! debug-threshold sink sees debug records even when the mirror is
//! configured at error. `level` gates only the primary mirror output.

use std::env;

use crate::encode::OutputFormat;
use crate::records::Level;

/// Facility defaults for sinks and the primary mirror.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Minimum severity written to the stderr mirror.
    pub level: Level,
    /// Default wire encoding for newly created pipe sinks.
    pub format: OutputFormat,
    /// Enables the plaintext stderr mirror.
    pub stderr: bool,
}

impl Config {
    /// Builds a configuration from the environment, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Recognized variables:
    /// - `LOGTEE_LEVEL`: level name (`trace`..`error`)
    /// - `LOGTEE_FMT`: `text`/`plaintext` or `json`/`structured`
    /// - `LOGTEE_STDERR`: `1`, `true` or `yes` to enable the mirror
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("LOGTEE_LEVEL") {
            if let Ok(level) = v.parse() {
                cfg.level = level;
            }
        }
        if let Ok(v) = env::var("LOGTEE_FMT") {
            if let Ok(format) = v.parse() {
                cfg.format = format;
            }
        }
        if let Ok(v) = env::var("LOGTEE_STDERR") {
            cfg.stderr = matches!(v.as_str(), "1" | "true" | "yes");
        }
        cfg
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `level = Info`
    /// - `format = Json`
    /// - `stderr = false` (the tee is usually embedded next to existing
    ///   primary destinations)
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: OutputFormat::Json,
            stderr: false,
        }
    }
}
