//! Typed configuration values
//!
//! The host persists every setting as a string. [`ConfigValue`] is the
//! coerced form readers work with, and [`AppConfig`] is the flat mapping
//! produced by the loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single coerced configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl ConfigValue {
    /// Coerce a string-encoded value
    ///
    /// - `"true"` / `"false"` become booleans
    /// - one or more ASCII digits become an integer (if it fits in `i64`)
    /// - anything else is kept verbatim
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = raw.parse::<i64>() {
                return Self::Integer(value);
            }
        }

        Self::String(raw.to_string())
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Flat mapping from configuration key to typed value
///
/// Keys are kept sorted so serialized payloads are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Insert or replace a value, returning the previous one
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Boolean flag lookup
    ///
    /// Only an explicit `true` enables a flag. Missing keys and non-boolean
    /// values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(ConfigValue::Bool(b)) => *b,
            Some(other) => {
                log::debug!("flag: '{}' holds a {}, treating as false", key, other.kind());
                false
            }
            None => false,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.entries.get(key).and_then(ConfigValue::as_integer)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(ConfigValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize back to a flat JSON object with typed values
    ///
    /// Feeding the result to [`super::load`] yields an equal config, as long
    /// as no string value is itself coercible (e.g. a `String("42")`).
    pub fn to_payload(&self) -> String {
        // A map of strings to scalars always serializes
        serde_json::to_string(&self.entries).unwrap_or_else(|_| String::from("{}"))
    }
}

impl FromIterator<(String, ConfigValue)> for AppConfig {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
