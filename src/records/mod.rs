//! Record data model: severity levels and the log event payload.
//!
//! ## Contents
//! - [`Level`] totally ordered severity enumeration
//! - [`Record`] immutable log event handed to the fan-out hook

mod level;
mod record;

pub use level::{Level, ParseLevelError};
pub use record::Record;
