//! Output format selector for encoded records.

use std::str::FromStr;

use thiserror::Error;

/// Wire encoding of a record on a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Tab-separated human-readable line.
    Plaintext,
    /// One JSON object per line.
    #[default]
    Json,
}

/// Error returned when parsing an unknown format name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown output format: {0:?}")]
pub struct ParseFormatError(pub String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plaintext" => Ok(OutputFormat::Plaintext),
            "json" | "structured" => Ok(OutputFormat::Json),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}
