//! JSON serialization for the `inspect` filter.
//!
//! Maps serialize in insertion order, which is why `serde_json` is built
//! with `preserve_order` at the workspace level.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => serializer.serialize_str(&t.to_rfc3339()),
            Value::Opaque(o) => serializer.serialize_str(&o.render()),
        }
    }
}

/// Debug rendering of a value as compact JSON, maps in insertion order.
pub fn inspect(v: &Value) -> String {
    serde_json::to_string(v).unwrap_or_default()
}
