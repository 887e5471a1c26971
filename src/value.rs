//! Value classification, key paths and stack-safe copying.

use serde_json::map::Iter;
use serde_json::{Map, Value};
use std::fmt;
use std::slice;

/// Coarse classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    pub fn is_mapping(self) -> bool {
        self == Self::Mapping
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

/// Location of a value inside nested mappings, as the keys leading to it.
///
/// Renders as `$` for the root and `$.type.style` below it. Keys that are
/// empty or contain a `.` are quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.0.push(key.into());
    }

    /// Return a copy extended by one key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(key);
        path
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for KeyPath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for key in &self.0 {
            if key.is_empty() || key.contains('.') {
                write!(f, ".{:?}", key)?;
            } else {
                write!(f, ".{}", key)?;
            }
        }
        Ok(())
    }
}

/// A container being copied, with the children not yet visited.
enum Partial<'a> {
    Sequence(Vec<Value>, slice::Iter<'a, Value>),
    Mapping(Map<String, Value>, Iter<'a>),
}

impl<'a> Partial<'a> {
    fn open(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Sequence(Vec::with_capacity(items.len()), items.iter())),
            Value::Object(map) => Some(Self::Mapping(Map::new(), map.iter())),
            _ => None,
        }
    }

    /// Next child and the key it lives under (empty inside sequences).
    fn next_child(&mut self) -> Option<(&'a str, &'a Value)> {
        match self {
            Self::Sequence(_, rest) => rest.next().map(|value| ("", value)),
            Self::Mapping(_, rest) => rest.next().map(|(key, value)| (key.as_str(), value)),
        }
    }

    fn push(&mut self, key: &str, value: Value) {
        match self {
            Self::Sequence(items, _) => items.push(value),
            Self::Mapping(map, _) => {
                map.insert(key.to_owned(), value);
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Sequence(items, _) => Value::Array(items),
            Self::Mapping(map, _) => Value::Object(map),
        }
    }
}

/// Deep copy of a value that keeps its own stack instead of recursing.
pub(crate) fn clone_value(value: &Value) -> Value {
    let Some(mut current) = Partial::open(value) else {
        return value.clone();
    };
    let mut stack: Vec<(Partial<'_>, &str)> = Vec::new();

    loop {
        match current.next_child() {
            Some((key, child)) => match Partial::open(child) {
                Some(partial) => stack.push((std::mem::replace(&mut current, partial), key)),
                None => current.push(key, child.clone()),
            },
            None => {
                let done = current.finish();
                match stack.pop() {
                    Some((mut parent, key)) => {
                        parent.push(key, done);
                        current = parent;
                    }
                    None => return done,
                }
            }
        }
    }
}
