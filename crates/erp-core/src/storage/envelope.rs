//! Versioned blob format for stored collections.
//!
//! Collections are written as
//! `{"schema_version": N, "records": [...]}`. A bare JSON array is the
//! unversioned layout older builds wrote and reads as version 0.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    records: &'a [T],
}

/// A stored record that did not decode as the expected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub reason: String,
}

/// Outcome of decoding a stored blob.
///
/// Records are decoded one at a time, so a single bad record does not make
/// the rest of the collection unreadable; it is reported in `skipped`.
#[derive(Debug)]
pub enum Decoded<T> {
    /// Blob was at the current version.
    Current { records: Vec<T>, skipped: Vec<Skipped> },
    /// Blob was older and has been migrated in memory.
    Migrated {
        from: u32,
        records: Vec<T>,
        skipped: Vec<Skipped>,
    },
    /// Blob was written by a newer build; contents are not interpreted.
    Newer(u32),
    /// Blob does not have a recognizable shape.
    Malformed(String),
}

/// Build the stored representation of `records`.
pub fn encode<T: Serialize>(records: &[T]) -> impl Serialize + '_ {
    EnvelopeRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        records,
    }
}

/// Decode a stored blob, migrating older layouts forward.
pub fn decode<T: DeserializeOwned>(raw: Value) -> Decoded<T> {
    let (version, records) = match raw {
        Value::Array(_) => (0, raw),
        Value::Object(mut map) => {
            let version = match map.get("schema_version").and_then(Value::as_u64) {
                // Anything past u32 is certainly from a newer build.
                Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
                None => return Decoded::Malformed("missing schema_version".to_string()),
            };
            match map.remove("records") {
                Some(records @ Value::Array(_)) => (version, records),
                _ => return Decoded::Malformed("records is not an array".to_string()),
            }
        }
        other => {
            return Decoded::Malformed(format!("unexpected top-level {}", json_kind(&other)));
        }
    };

    if version > CURRENT_SCHEMA_VERSION {
        return Decoded::Newer(version);
    }

    let mut migrated = records;
    for from in version..CURRENT_SCHEMA_VERSION {
        migrated = migrate_step(from, migrated);
    }

    let Value::Array(items) = migrated else {
        return Decoded::Malformed("records is not an array".to_string());
    };
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(err) => skipped.push(Skipped {
                index,
                reason: err.to_string(),
            }),
        }
    }

    if version == CURRENT_SCHEMA_VERSION {
        Decoded::Current { records, skipped }
    } else {
        Decoded::Migrated {
            from: version,
            records,
            skipped,
        }
    }
}

/// Upgrade a records array from version `from` to `from + 1`.
fn migrate_step(from: u32, records: Value) -> Value {
    match from {
        // v0 -> v1 only introduced the envelope; record shapes are unchanged.
        0 => records,
        _ => records,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
