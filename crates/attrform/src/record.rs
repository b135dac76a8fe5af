//! Per-instance storage of resolved attribute values.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::attributes::{Value, ValueMap};

static NIL: Value = Value::Nil;

/// One stored value per declared attribute, in declaration order.
///
/// Only the construction pipeline writes to a record; everything public is
/// read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: ValueMap,
}

impl Record {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: ValueMap::with_capacity(capacity),
        }
    }

    pub(crate) fn store(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }

    /// Stored value for a declared attribute, or `None` for names the
    /// record does not hold.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stored value for `name`, `Nil` when the record does not hold it.
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NIL)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Project the stored values into a plain ordered mapping.
    pub fn to_hash(&self) -> ValueMap {
        self.values.clone()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
