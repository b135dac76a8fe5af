//! Raw construction input.
//!
//! Keys are normalized to their string form when they enter an [`Input`]:
//! an identifier key in [`input!`](crate::input!) and a string key with the
//! same spelling are the same key. Matching against declared names is exact
//! and case sensitive. Inserting a key twice keeps the last value.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::attributes::{Value, ValueMap};
use crate::error::{AttrformError, Result};

/// Unordered-by-contract mapping from key to raw value, kept in insertion
/// order so error messages list offending keys deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    entries: IndexMap<String, Value>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<Value>) {
        self.entries
            .insert(key.as_ref().to_string(), value.into());
    }

    /// Chaining form of [`Input::insert`].
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Remove and return the raw value for `key`, if present.
    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn into_map(self) -> ValueMap {
        self.entries
    }

    /// Build input from a JSON object. `null` is treated as absent input.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match Value::from(json) {
            Value::Map(map) => Ok(Self { entries: map }),
            Value::Nil => Ok(Self::new()),
            other => Err(AttrformError::InvalidInput(other.kind())),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(json)
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Input {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Input::new();
        for (key, value) in iter {
            input.insert(key, value);
        }
        input
    }
}

impl From<ValueMap> for Input {
    fn from(entries: ValueMap) -> Self {
        Self { entries }
    }
}

/// Entries are sorted by key, since `HashMap` iteration order is unspecified.
impl<K: AsRef<str>, V: Into<Value>> From<HashMap<K, V>> for Input {
    fn from(map: HashMap<K, V>) -> Self {
        let mut input: Input = map.into_iter().collect();
        input.entries.sort_unstable_keys();
        input
    }
}

/// `None` is the absent input.
impl From<Option<Input>> for Input {
    fn from(input: Option<Input>) -> Self {
        input.unwrap_or_default()
    }
}

impl From<Input> for Value {
    fn from(input: Input) -> Self {
        Value::Map(input.entries)
    }
}

/// Build an [`Input`] from `key => value` pairs.
///
/// Keys may be identifiers or string literals; both normalize to the same
/// string. Values are anything convertible into [`Value`], including a
/// nested `input!`.
///
/// ```
/// use attrform::{input, Value};
///
/// let a = input! { sample => "Hello", a_date => input! { year => 2015, month => 1, day => 1 } };
/// let b = input! { "sample" => "Hello", "a_date" => input! { "year" => 2015, "month" => 1, "day" => 1 } };
/// assert_eq!(a, b);
/// assert_eq!(a.get("sample"), Some(&Value::from("Hello")));
/// ```
#[macro_export]
macro_rules! input {
    (@entries $input:ident; ) => {};
    (@entries $input:ident; $key:ident => $value:expr $(, $($rest:tt)*)?) => {
        $input.insert(stringify!($key), $value);
        $crate::input!(@entries $input; $($($rest)*)?);
    };
    (@entries $input:ident; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $input.insert($key, $value);
        $crate::input!(@entries $input; $($($rest)*)?);
    };
    () => {
        $crate::Input::new()
    };
    ($($body:tt)+) => {{
        let mut input = $crate::Input::new();
        $crate::input!(@entries input; $($body)+);
        input
    }};
}
