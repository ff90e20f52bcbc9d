// Author: Dustin Pilgrim
// License: MIT

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A property map value (`a{sv}` on the wire), detached from any transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Str(String),
    /// Container or otherwise unmodelled value, kept in a printable form.
    Other(String),
}

pub type Properties = BTreeMap<String, PropValue>;

impl PropValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            PropValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::UInt(u) => write!(f, "{u}"),
            PropValue::Double(d) => write!(f, "{d}"),
            PropValue::Str(s) => write!(f, "{s:?}"),
            PropValue::Other(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

pub(crate) fn flag(props: &Properties, key: &str) -> bool {
    props.get(key).and_then(PropValue::as_bool).unwrap_or(false)
}

pub(crate) fn string<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props.get(key).and_then(PropValue::as_str)
}
