//! Attribute definitions.
//!
//! An [`Attribute`] is the declaration of one field: its name, how raw input
//! is coerced, whether a value is required, and what to store when the input
//! does not mention it.

use std::fmt;

use super::Value;
use crate::coerce::{Coercion, CoercionResult};

/// Definition of a single declared attribute.
///
/// Built with chained calls, mirroring the options accepted by the
/// declaration API:
///
/// ```
/// use attrform::{coerce, Attribute, Record};
///
/// let attr = Attribute::<Record>::new("a_string")
///     .coerce(coerce::upcase)
///     .required(true);
/// assert!(attr.is_required());
/// ```
pub struct Attribute<T> {
    name: String,
    coercion: Option<Coercion<T>>,
    required: bool,
    default: Value,
}

impl<T> Attribute<T> {
    /// Create a definition with no coercion, not required, defaulting to `Nil`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coercion: None,
            required: false,
            default: Value::Nil,
        }
    }

    /// Coerce present inputs with a free-standing function.
    pub fn coerce<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> CoercionResult + Send + Sync + 'static,
    {
        self.coercion(Coercion::function(f))
    }

    /// Coerce present inputs with a method of the constructed type.
    pub fn coerce_with(self, method: fn(&T, Value) -> CoercionResult) -> Self {
        self.coercion(Coercion::method(method))
    }

    pub fn coercion(mut self, coercion: Coercion<T>) -> Self {
        self.coercion = Some(coercion);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value stored when the input has no entry for this attribute. Never coerced.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn has_coercion(&self) -> bool {
        self.coercion.is_some()
    }

    /// Turn a present raw value into the stored value.
    pub(crate) fn resolve(&self, instance: &T, raw: Value) -> CoercionResult {
        match &self.coercion {
            Some(coercion) => coercion.apply(instance, raw),
            None => Ok(raw),
        }
    }
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            coercion: self.coercion.clone(),
            required: self.required,
            default: self.default.clone(),
        }
    }
}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("coercion", &self.coercion)
            .field("required", &self.required)
            .field("default", &self.default)
            .finish()
    }
}
