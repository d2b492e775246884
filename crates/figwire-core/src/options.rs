// File: crates/figwire-core/src/options.rs
// Summary: Typed keyword options captured into each series at emission time.

use std::collections::BTreeMap;

/// A single typed option value. The wire carries three value types; which
/// option names do anything is up to the rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Str(String),
    Int(i32),
    Float(f64),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric view of the value: `Int` widens to `f64`, `Str` is `None`.
    /// Producers are free to write e.g. a line width as either type.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(f) => Some(*f),
            OptionValue::Str(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<i32> for OptionValue {
    fn from(i: i32) -> Self {
        OptionValue::Int(i)
    }
}

impl From<f64> for OptionValue {
    fn from(f: f64) -> Self {
        OptionValue::Float(f)
    }
}

/// Unique-key option map. Setting an existing key replaces its value; a
/// series holds the clone taken when it was emitted, so later changes to the
/// decoder's accumulator never leak backwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionSet {
    entries: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
