//! # Attribute System
//!
//! Declared attributes and the values they hold.
//!
//! - **Values**: [`Value`], the dynamic representation of raw inputs and
//!   coerced results
//! - **Definitions**: [`Attribute`], the per-field declaration (coercion,
//!   required flag, default)
//!
//! ## Attribute Options
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `coerce` / `coerce_with` | none | transform a present raw value (including `Nil`) |
//! | `required` | `false` | construction fails if the resolved value is `Nil` |
//! | `default` | `Nil` | stored, uncoerced, when the input has no entry |
//!
//! ## Usage
//!
//! ```
//! use attrform::{coerce, Attribute, Record, Schema};
//!
//! let mut schema = Schema::<Record>::new("Example");
//! schema.declare_attribute(Attribute::new("sample"));
//! schema.declare_attribute(Attribute::new("a_string").coerce(coerce::upcase));
//! schema.declare_attribute(Attribute::new("a_default").default("foo"));
//!
//! let record = schema.instantiate(attrform::input! { a_string => "hello" }).unwrap();
//! assert_eq!(record.value("a_string").as_str(), Some("HELLO"));
//! assert_eq!(record.value("a_default").as_str(), Some("foo"));
//! ```

mod spec;
mod value;

pub use spec::Attribute;
pub use value::{Value, ValueMap, ISO_DATE};
