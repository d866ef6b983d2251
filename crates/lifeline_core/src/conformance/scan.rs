//! Raw document scan that keeps repeated object keys visible.
//!
//! `serde_json::Value` keeps only the last value of a repeated key. Typed
//! parsing of `LifeEvent` rejects repeats, so records are scanned here
//! before they collapse into a `Value`.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt::Formatter;

/// A parsed JSON node. Objects remember which keys appeared more than once.
pub(crate) enum Scanned {
    Object {
        entries: Map<String, Value>,
        /// Repeated keys, in order of first repetition.
        duplicate_keys: Vec<String>,
    },
    Array(Vec<Scanned>),
    Other(Value),
}

impl Scanned {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Self::Object { entries, .. } => Value::Object(entries),
            Self::Array(items) => Value::Array(items.into_iter().map(Self::into_value).collect()),
            Self::Other(value) => value,
        }
    }
}

impl<'de> Deserialize<'de> for Scanned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScannedVisitor)
    }
}

struct ScannedVisitor;

impl<'de> Visitor<'de> for ScannedVisitor {
    type Value = Scanned;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::Bool(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::from(value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::from(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::String(value.to_string())))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::String(value)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Scanned, E> {
        Ok(Scanned::Other(Value::Null))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Scanned, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Scanned>()? {
            items.push(item);
        }
        Ok(Scanned::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scanned, A::Error> {
        let mut entries = Map::new();
        let mut duplicate_keys = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<Value>()?;
            if entries.insert(key.clone(), value).is_some() && !duplicate_keys.contains(&key) {
                duplicate_keys.push(key);
            }
        }
        Ok(Scanned::Object {
            entries,
            duplicate_keys,
        })
    }
}
