use thiserror::Error;

/// Error produced by a coercion and handed back to the caller untouched.
pub type CoercionError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum AttrformError {
    #[error("{model}: missing required attribute(s): {}", .names.join(", "))]
    MissingRequiredAttribute { model: String, names: Vec<String> },

    #[error("{model}: undeclared attribute(s): {}", .keys.join(", "))]
    UndeclaredAttribute { model: String, keys: Vec<String> },

    #[error(transparent)]
    Coercion(CoercionError),

    #[error("Input must be a mapping, got {0}")]
    InvalidInput(&'static str),

    #[error("Unknown coercion `{name}` for attribute `{attribute}`")]
    UnknownCoercion { attribute: String, name: String },

    #[error("Schema file error: {0}")]
    SchemaFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AttrformError>;

/// Failures of the builtin coercions in [`crate::coerce`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("cannot coerce {found} with `{coercion}`")]
    UnsupportedType {
        coercion: &'static str,
        found: &'static str,
    },

    #[error("cannot parse {value:?} as {target}")]
    Unparseable { value: String, target: &'static str },

    #[error("date input is missing `{0}`")]
    MissingDateField(&'static str),

    #[error("date field `{field}` must be a whole number, got {found}")]
    InvalidDateField {
        field: &'static str,
        found: &'static str,
    },

    #[error("{year}-{month}-{day} is not a valid date")]
    InvalidDate { year: i64, month: i64, day: i64 },
}
