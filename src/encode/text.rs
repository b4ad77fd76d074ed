//! Plaintext encoder: one tab-separated line per record.
//!
//! ```text
//! 2026-08-23T10:15:42.123456Z\tERROR\tstorage\tdisk almost full\tfree_bytes=1024
//! ```
//!
//! Field values are rendered in their JSON representation so that strings
//! stay unambiguous (`key="value"`).

use chrono::{DateTime, SecondsFormat, Utc};

use crate::records::Record;

/// Encodes a record as one human-readable line, terminator included.
pub fn encode(record: &Record) -> Vec<u8> {
    let ts: DateTime<Utc> = record.at.into();
    let mut line = String::with_capacity(64 + record.message.len());

    line.push_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true));
    line.push('\t');
    line.push_str(record.level.as_str());
    line.push('\t');
    if let Some(logger) = &record.logger {
        line.push_str(logger);
        line.push('\t');
    }
    line.push_str(&record.message);
    for (key, value) in &record.fields {
        line.push('\t');
        line.push_str(key);
        line.push('=');
        line.push_str(&value.to_string());
    }
    line.push('\n');

    line.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Level;

    #[test]
    fn test_line_contains_message_and_level() {
        let rec = Record::new(Level::Error, "boom").with_logger("test");
        let line = String::from_utf8(encode(&rec)).unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains("ERROR"));
        assert!(line.contains("test"));
        assert!(line.contains("boom"));
    }

    #[test]
    fn test_fields_render_as_json_values() {
        let rec = Record::new(Level::Info, "m")
            .with_field("count", 3)
            .with_field("name", "n");
        let line = String::from_utf8(encode(&rec)).unwrap();
        assert!(line.contains("count=3"));
        assert!(line.contains("name=\"n\""));
    }
}
