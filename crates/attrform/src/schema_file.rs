//! Schema files: declaring a type in TOML or JSON instead of Rust.
//!
//! ```toml
//! name = "Example"
//! undefined_attributes = "ignore"
//!
//! [[attributes]]
//! name = "a_date"
//! coerce = "to_date"
//!
//! [[attributes]]
//! name = "a_default"
//! default = "foo"
//! required = true
//! ```
//!
//! Coercions are referenced by builtin name (see
//! [`coerce::BUILTIN_NAMES`](crate::coerce::BUILTIN_NAMES)). The file format
//! is picked from the extension: `.json` is JSON, anything else is TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::{Attribute, Value};
use crate::coerce;
use crate::config::AttrformConfig;
use crate::error::{AttrformError, Result};
use crate::record::Record;
use crate::schema::{Schema, UndefinedAttributes};

/// Type name used when a schema file does not set one.
pub const DEFAULT_NAME: &str = "Record";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub name: Option<String>,

    /// Falls back to the configured policy when absent.
    #[serde(default)]
    pub undefined_attributes: Option<UndefinedAttributes>,

    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeEntry {
    pub name: String,

    #[serde(default)]
    pub coerce: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default: Option<Value>,
}

impl SchemaFile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading schema file");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Build the registry, resolving coercion names against the builtins.
    pub fn into_schema(self, config: &AttrformConfig) -> Result<Schema<Record>> {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        if name.trim().is_empty() {
            return Err(AttrformError::SchemaFile(
                "schema name cannot be empty".to_string(),
            ));
        }

        let mut schema = Schema::new(name);
        schema.set_undefined_attribute_policy(
            self.undefined_attributes
                .unwrap_or(config.undefined_attributes),
        );

        for entry in self.attributes {
            if entry.name.trim().is_empty() {
                return Err(AttrformError::SchemaFile(format!(
                    "{}: attribute name cannot be empty",
                    schema.name()
                )));
            }

            let mut attribute = Attribute::new(entry.name.as_str()).required(entry.required);
            if let Some(default) = entry.default {
                attribute = attribute.default(default);
            }
            if let Some(coerce_name) = entry.coerce {
                let coercion = coerce::by_name(&coerce_name, config).ok_or_else(|| {
                    AttrformError::UnknownCoercion {
                        attribute: entry.name.clone(),
                        name: coerce_name.clone(),
                    }
                })?;
                attribute = attribute.coercion(coercion);
            }
            schema.declare_attribute(attribute);
        }

        Ok(schema)
    }
}
