//! Structured encoder: one JSON object per line.
//!
//! Fixed keys `ts`, `level`, `logger`, `msg`, `seq`; record fields are
//! flattened into the same object. A record field that collides with a
//! fixed key overwrites it, matching flat structured-log conventions.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::EncodeError;
use crate::records::Record;

/// Encodes a record as one JSON line, terminator included.
pub fn encode(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let ts: DateTime<Utc> = record.at.into();

    let mut obj = Map::new();
    obj.insert(
        "ts".into(),
        Value::String(ts.to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    obj.insert("level".into(), Value::String(record.level.as_str().into()));
    if let Some(logger) = &record.logger {
        obj.insert("logger".into(), Value::String(logger.to_string()));
    }
    obj.insert("msg".into(), Value::String(record.message.to_string()));
    obj.insert("seq".into(), Value::from(record.seq));
    for (key, value) in &record.fields {
        obj.insert(key.to_string(), value.clone());
    }

    let mut bytes = serde_json::to_vec(&Value::Object(obj))?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Level;

    #[test]
    fn test_round_trips_as_json_object() {
        let rec = Record::new(Level::Warn, "low space")
            .with_logger("storage")
            .with_field("free", 42);
        let bytes = encode(&rec).unwrap();
        assert_eq!(*bytes.last().unwrap(), b'\n');

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["logger"], "storage");
        assert_eq!(value["msg"], "low space");
        assert_eq!(value["free"], 42);
    }
}
