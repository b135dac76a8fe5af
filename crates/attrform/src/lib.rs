//! # attrform
//!
//! Declarative attributes for plain data objects. A type declares its fields
//! once; each field may be coerced, defaulted, or required. Instances are
//! built from an unordered mapping of names to raw values and project back
//! into an ordered mapping of coerced values.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Declaration                                                 │
//! │  - model! macro (model.rs) or Schema builder (schema.rs)     │
//! │  - schema files (schema_file.rs) for runtime-defined types   │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Registry: Schema<T>                                         │
//! │  - ordered Attribute<T> definitions + undefined policy       │
//! │  - built once per type, read-only afterwards                 │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Construction: Schema::construct                             │
//! │  - undeclared key policy → coerce or default → required      │
//! │  - result stored in a Record; to_hash() projects it back     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use attrform::{coerce, input, model, Value};
//!
//! model! {
//!     #[derive(Debug)]
//!     pub struct Example {
//!         sample,
//!         a_date { coerce: coerce::to_date },
//!         a_string { coerce: coerce::upcase },
//!     }
//! }
//!
//! let example = Example::new(input! {
//!     sample => "Hello",
//!     a_date => input! { year => 2015, month => 1, day => 1 },
//!     a_string => "hello",
//! })
//! .unwrap();
//!
//! let hash = example.to_hash();
//! assert_eq!(hash.keys().collect::<Vec<_>>(), vec!["sample", "a_date", "a_string"]);
//! assert_eq!(hash["a_string"], Value::from("HELLO"));
//! ```
//!
//! ## Logging
//!
//! The pipeline emits `tracing` events: a debug span per construction,
//! `trace` per resolved attribute, `debug` when undeclared keys are dropped
//! and `warn` when an attribute is redeclared.

pub mod attributes;
pub mod coerce;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod record;
pub mod schema;
pub mod schema_file;

pub use attributes::{Attribute, Value, ValueMap};
pub use coerce::{Coercion, CoercionResult};
pub use config::AttrformConfig;
pub use error::{AttrformError, CoerceError, CoercionError, Result};
pub use input::Input;
pub use model::{Model, Storage};
pub use record::Record;
pub use schema::{Schema, UndefinedAttributes};
pub use schema_file::SchemaFile;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use serde::{Serialize, Serializer};

    /// Proof that the caller is this crate's construction pipeline.
    ///
    /// Generated code names the type but cannot build a value of it, so
    /// stored values can only be written through construction.
    pub struct Seal(pub(crate) ());
}
