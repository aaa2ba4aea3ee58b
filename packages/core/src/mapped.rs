//! The generic output tree.

use std::collections::BTreeMap;

use crate::path::{Path, Segment};
use crate::value::Value;

/// A generic mapping produced from a record or a string-keyed map.
pub type Mapping = BTreeMap<String, Mapped>;

/// The result of mapping a value.
///
/// Records and string-keyed maps become `Mapping`s, sequences of convertible
/// composites become `Sequence`s, and everything the mapper does not convert
/// is handed back as the original `Value`. Key order in a mapping is not
/// meaningful; `BTreeMap` just makes it deterministic.
#[derive(Clone, Debug, PartialEq)]
pub enum Mapped {
    Mapping(Mapping),
    Sequence(Vec<Mapped>),
    Value(Value),
}

impl Mapped {
    /// Wrap a value that is passed through unconverted.
    ///
    /// The clone shares all `Arc` payloads with the input.
    pub fn passthrough(value: &Value) -> Self {
        Mapped::Value(value.clone())
    }

    /// An empty mapping.
    pub fn mapping() -> Self {
        Mapped::Mapping(Mapping::new())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Mapped::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Mapped::Sequence(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Mapped::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Mapped]> {
        match self {
            Mapped::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Mapped::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Mapped::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Get a nested result by path.
    ///
    /// Returns `None` if the path doesn't exist or crosses a passed-through
    /// value. Field segments look up mapping keys, so after a rename the
    /// path must use the new name.
    pub fn get(&self, path: &Path) -> Option<&Mapped> {
        let mut current = self;
        for segment in path.iter() {
            current = match (current, segment) {
                (Mapped::Mapping(mapping), Segment::Field(name)) => mapping.get(name)?,
                (Mapped::Sequence(items), Segment::Index(index)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl From<Value> for Mapped {
    fn from(v: Value) -> Self {
        Mapped::Value(v)
    }
}

impl From<Mapping> for Mapped {
    fn from(v: Mapping) -> Self {
        Mapped::Mapping(v)
    }
}

impl From<Vec<Mapped>> for Mapped {
    fn from(v: Vec<Mapped>) -> Self {
        Mapped::Sequence(v)
    }
}

impl From<&str> for Mapped {
    fn from(v: &str) -> Self {
        Mapped::Value(Value::from(v))
    }
}

impl From<String> for Mapped {
    fn from(v: String) -> Self {
        Mapped::Value(Value::from(v))
    }
}

impl From<i64> for Mapped {
    fn from(v: i64) -> Self {
        Mapped::Value(Value::from(v))
    }
}

impl From<u64> for Mapped {
    fn from(v: u64) -> Self {
        Mapped::Value(Value::from(v))
    }
}

impl From<f64> for Mapped {
    fn from(v: f64) -> Self {
        Mapped::Value(Value::from(v))
    }
}

impl From<bool> for Mapped {
    fn from(v: bool) -> Self {
        Mapped::Value(Value::from(v))
    }
}
