//! Attribute registry and construction pipeline.
//!
//! A [`Schema`] is the per-type registry of attribute definitions. It is
//! populated once, when the type is declared, and only read afterwards:
//! every construction walks it in declaration order.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::__private::Seal;
use crate::attributes::Attribute;
use crate::error::{AttrformError, Result};
use crate::input::Input;
use crate::model::Storage;
use crate::record::Record;

/// What construction does with input keys that match no declared attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedAttributes {
    /// Reject the construction, naming the offending keys.
    #[default]
    Raise,
    /// Drop the keys silently.
    Ignore,
}

impl fmt::Display for UndefinedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedAttributes::Raise => f.write_str("raise"),
            UndefinedAttributes::Ignore => f.write_str("ignore"),
        }
    }
}

impl FromStr for UndefinedAttributes {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raise" => Ok(UndefinedAttributes::Raise),
            "ignore" => Ok(UndefinedAttributes::Ignore),
            other => Err(format!(
                "unknown undefined-attributes policy '{}' (expected raise or ignore)",
                other
            )),
        }
    }
}

/// Ordered registry of the attributes declared on one type.
pub struct Schema<T> {
    name: String,
    attributes: IndexMap<String, Attribute<T>>,
    undefined_attributes: UndefinedAttributes,
}

impl<T> Schema<T> {
    /// Create an empty registry for the type called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            undefined_attributes: UndefinedAttributes::default(),
        }
    }

    /// Append a definition.
    ///
    /// Declaring a name that already exists replaces the earlier definition
    /// and keeps its original position.
    pub fn declare_attribute(&mut self, attribute: Attribute<T>) -> &mut Self {
        let name = attribute.name().to_string();
        if self.attributes.contains_key(&name) {
            warn!(model = %self.name, attribute = %name, "attribute redeclared");
        }
        self.attributes.insert(name, attribute);
        self
    }

    pub fn set_undefined_attribute_policy(&mut self, policy: UndefinedAttributes) -> &mut Self {
        self.undefined_attributes = policy;
        self
    }

    /// Consuming form of [`Schema::declare_attribute`].
    pub fn with_attribute(mut self, attribute: Attribute<T>) -> Self {
        self.declare_attribute(attribute);
        self
    }

    /// Consuming form of [`Schema::set_undefined_attribute_policy`].
    pub fn with_undefined_attributes(mut self, policy: UndefinedAttributes) -> Self {
        self.set_undefined_attribute_policy(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn undefined_attributes(&self) -> UndefinedAttributes {
        self.undefined_attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Declared attribute names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute<T>> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute<T>> {
        self.attributes.values()
    }
}

impl<T: Storage> Schema<T> {
    /// Validate, default and coerce `input` into `instance`.
    ///
    /// `instance` starts out blank; method coercions see it holding the
    /// attributes resolved before theirs. Any failure discards it.
    #[tracing::instrument(level = "debug", skip_all, fields(model = %self.name))]
    pub(crate) fn construct(&self, mut input: Input, mut instance: T) -> Result<T> {
        let undeclared: Vec<String> = input
            .keys()
            .filter(|key| !self.declares(key))
            .map(str::to_string)
            .collect();
        if !undeclared.is_empty() {
            match self.undefined_attributes {
                UndefinedAttributes::Raise => {
                    return Err(AttrformError::UndeclaredAttribute {
                        model: self.name.clone(),
                        keys: undeclared,
                    });
                }
                UndefinedAttributes::Ignore => {
                    debug!(keys = ?undeclared, "dropping undeclared attributes");
                }
            }
        }

        instance.record_mut(Seal(())).clear();
        for attribute in self.attributes.values() {
            let value = match input.take(attribute.name()) {
                Some(raw) => attribute
                    .resolve(&instance, raw)
                    .map_err(AttrformError::Coercion)?,
                None => attribute.default_value().clone(),
            };
            trace!(attribute = attribute.name(), kind = value.kind(), "resolved");
            instance.record_mut(Seal(())).store(attribute.name(), value);
        }

        let missing = self.missing_required(instance.record());
        if !missing.is_empty() {
            return Err(AttrformError::MissingRequiredAttribute {
                model: self.name.clone(),
                names: missing,
            });
        }

        Ok(instance)
    }

    fn missing_required(&self, record: &Record) -> Vec<String> {
        self.attributes
            .values()
            .filter(|attribute| attribute.is_required())
            .filter(|attribute| record.value(attribute.name()).is_nil())
            .map(|attribute| attribute.name().to_string())
            .collect()
    }
}

impl Schema<Record> {
    /// Construct a bare [`Record`] for a schema assembled at runtime.
    pub fn instantiate(&self, input: impl Into<Input>) -> Result<Record> {
        self.construct(input.into(), Record::with_capacity(self.len()))
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            undefined_attributes: self.undefined_attributes,
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("attributes", &self.attributes.values().collect::<Vec<_>>())
            .field("undefined_attributes", &self.undefined_attributes)
            .finish()
    }
}
