//! # Record encoders.
//!
//! Pure functions that turn a [`Record`](crate::Record) into one
//! encoded line in the requested [`OutputFormat`]. Stateless; every record
//! is encoded as a single unit including its terminator, which is what
//! gives sinks record-granularity interleaving under concurrent writers.
//!
//! ## Contents
//! - [`OutputFormat`] encoding selector (plaintext vs structured JSON)
//! - [`encode`] dispatching entry point used by the fan-out hook

mod format;
mod json;
mod text;

pub use format::{OutputFormat, ParseFormatError};

use crate::error::EncodeError;
use crate::records::Record;

/// Encodes one record in the given format, terminator included.
pub fn encode(record: &Record, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Plaintext => Ok(text::encode(record)),
        OutputFormat::Json => json::encode(record),
    }
}
