//! Normalized response payloads.
//!
//! # Design
//! API responses arrive as arbitrary JSON. Instead of handing callers raw
//! `serde_json::Value` trees, every parsed body is run through
//! [`normalize`], which recursively re-types object keys into the crate's
//! canonical [`Key`] space. Values are untouched. Callers then access
//! fields uniformly through [`Payload::get`] with plain `&str` lookups,
//! and two payloads compare equal iff their normalized trees do.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Canonical form of a JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Box<str>);

impl Key {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A JSON document whose object keys have been normalized into [`Key`]s.
///
/// Mirrors the shape of `serde_json::Value`; only the key type differs.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Payload>),
    Object(BTreeMap<Key, Payload>),
}

impl Payload {
    /// Look up a field of an object payload. Returns `None` for missing
    /// keys and for non-object payloads.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Payload]> {
        match self {
            Payload::Array(items) => Some(items),
            _ => None,
        }
    }

    /// A `{message: ...}` object, the shape used for locally synthesized
    /// failure payloads.
    pub(crate) fn message(text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Key::new("message"), Payload::String(text.into()));
        Payload::Object(map)
    }
}

/// Recursively convert a parsed JSON value into a [`Payload`], re-typing
/// every object key (nested ones included) into the canonical [`Key`] space.
pub fn normalize(value: Value) -> Payload {
    match value {
        Value::Null => Payload::Null,
        Value::Bool(flag) => Payload::Bool(flag),
        Value::Number(number) => Payload::Number(number),
        Value::String(text) => Payload::String(text),
        Value::Array(items) => Payload::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Payload::Object(
            map.into_iter()
                .map(|(key, value)| (Key::new(key), normalize(value)))
                .collect(),
        ),
    }
}
