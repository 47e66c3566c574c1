//! Shorthand expander.
//!
//! Metadata entries come in two shapes: a full record
//! (`text: { type: "string" }`) or a bare scalar shorthand
//! (`text: "string"`) that stands for the record's most common field.
//! [`expand`] normalizes both into record form; everything else is
//! reported back to the caller as invalid so the member can be skipped
//! without aborting the class.

use serde_json::{Map, Value};

/// Outcome of expanding one metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    /// The entry in record form (either expanded from a scalar or already
    /// record-shaped).
    Record(Map<String, Value>),
    /// The entry was absent (or an explicit `null`); absence propagates.
    Absent,
    /// Neither a scalar shorthand nor a record.
    Invalid,
}

/// Normalizes a metadata entry that may be a bare scalar into record form.
///
/// A scalar entry is wrapped as `{ <default_key>: entry }`. When no default
/// key applies (events have none), a scalar entry is invalid.
pub fn expand(entry: Option<&Value>, default_key: Option<&str>) -> Expansion {
    match entry {
        None | Some(Value::Null) => Expansion::Absent,
        Some(Value::Object(record)) => Expansion::Record(record.clone()),
        Some(scalar @ (Value::String(_) | Value::Bool(_) | Value::Number(_))) => {
            match default_key {
                Some(key) => {
                    let mut record = Map::new();
                    record.insert(key.to_string(), scalar.clone());
                    Expansion::Record(record)
                }
                None => Expansion::Invalid,
            }
        }
        Some(Value::Array(_)) => Expansion::Invalid,
    }
}
