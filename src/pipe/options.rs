//! Per-sink creation options.

use crate::encode::OutputFormat;
use crate::records::Level;

/// Options for a new pipe sink.
///
/// Both knobs are optional:
/// - `level`: minimum severity delivered to this sink (inclusive).
///   Default: accept all levels.
/// - `format`: wire encoding for this sink.
///   Default: the process-wide format from [`Config`](crate::Config).
///
/// ## Example
/// ```rust
/// use logtee::{Level, OutputFormat, PipeOpts};
///
/// let opts = PipeOpts::default()
///     .with_level(Level::Error)
///     .with_format(OutputFormat::Plaintext);
/// assert_eq!(opts.level, Some(Level::Error));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeOpts {
    /// Minimum severity threshold; `None` accepts everything.
    pub level: Option<Level>,
    /// Wire encoding; `None` uses the process default.
    pub format: Option<OutputFormat>,
}

impl PipeOpts {
    /// Sets the minimum severity threshold (inclusive).
    #[inline]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the wire encoding for this sink.
    #[inline]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}
