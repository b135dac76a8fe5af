//! Coercions: transforms from a raw input value to the stored value.
//!
//! A coercion is either a free-standing function or a method reference that
//! is called with the instance under construction. The builtin functions in
//! this module cover the common scalar conversions and all of them map `Nil`
//! to `Nil`, so they are safe on present-but-null inputs.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::attributes::{Value, ISO_DATE};
use crate::config::AttrformConfig;
use crate::error::{CoerceError, CoercionError};

pub type CoercionResult = std::result::Result<Value, CoercionError>;

type CoerceFn = dyn Fn(Value) -> CoercionResult + Send + Sync;

/// How an attribute turns its raw input into a stored value.
pub enum Coercion<T> {
    /// A free-standing unary function or closure.
    Function(Arc<CoerceFn>),
    /// A method resolved against the instance under construction. The
    /// instance holds the attributes declared before this one.
    Method(fn(&T, Value) -> CoercionResult),
}

impl<T> Coercion<T> {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(Value) -> CoercionResult + Send + Sync + 'static,
    {
        Coercion::Function(Arc::new(f))
    }

    pub fn method(method: fn(&T, Value) -> CoercionResult) -> Self {
        Coercion::Method(method)
    }

    pub fn apply(&self, instance: &T, raw: Value) -> CoercionResult {
        match self {
            Coercion::Function(f) => f(raw),
            Coercion::Method(m) => m(instance, raw),
        }
    }
}

impl<T> Clone for Coercion<T> {
    fn clone(&self) -> Self {
        match self {
            Coercion::Function(f) => Coercion::Function(Arc::clone(f)),
            Coercion::Method(m) => Coercion::Method(*m),
        }
    }
}

impl<T> fmt::Debug for Coercion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coercion::Function(_) => f.write_str("Coercion::Function(..)"),
            Coercion::Method(_) => f.write_str("Coercion::Method(..)"),
        }
    }
}

/// Names accepted by [`by_name`], in the order they are documented.
pub const BUILTIN_NAMES: &[&str] = &[
    "upcase",
    "downcase",
    "strip",
    "to_string",
    "to_integer",
    "to_float",
    "to_boolean",
    "to_date",
];

/// Resolve a builtin coercion by name.
///
/// `to_date` honours the configured `date_format` for string inputs.
pub fn by_name<T>(name: &str, config: &AttrformConfig) -> Option<Coercion<T>> {
    let coercion = match name {
        "upcase" => Coercion::function(upcase),
        "downcase" => Coercion::function(downcase),
        "strip" => Coercion::function(strip),
        "to_string" => Coercion::function(to_string),
        "to_integer" => Coercion::function(to_integer),
        "to_float" => Coercion::function(to_float),
        "to_boolean" => Coercion::function(to_boolean),
        "to_date" => Coercion::function(to_date_with_format(config.date_format().to_string())),
        _ => return None,
    };
    Some(coercion)
}

fn unsupported(coercion: &'static str, value: &Value) -> CoercionError {
    Box::new(CoerceError::UnsupportedType {
        coercion,
        found: value.kind(),
    })
}

fn map_string(
    coercion: &'static str,
    value: Value,
    f: impl FnOnce(&str) -> String,
) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::String(s) => Ok(Value::String(f(&s))),
        other => Err(unsupported(coercion, &other)),
    }
}

pub fn upcase(value: Value) -> CoercionResult {
    map_string("upcase", value, str::to_uppercase)
}

pub fn downcase(value: Value) -> CoercionResult {
    map_string("downcase", value, str::to_lowercase)
}

pub fn strip(value: Value) -> CoercionResult {
    map_string("strip", value, |s| s.trim().to_string())
}

/// Render scalars as strings. Dates use the ISO format.
pub fn to_string(value: Value) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::String(s) => Ok(Value::String(s)),
        Value::Bool(v) => Ok(Value::String(v.to_string())),
        Value::Integer(v) => Ok(Value::String(v.to_string())),
        Value::Float(v) => Ok(Value::String(v.to_string())),
        Value::Date(d) => Ok(Value::String(d.format(ISO_DATE).to_string())),
        other => Err(unsupported("to_string", &other)),
    }
}

/// Integers pass through, whole floats within `i64` range convert exactly,
/// strings are parsed after trimming.
pub fn to_integer(value: Value) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::Integer(v) => Ok(Value::Integer(v)),
        Value::Float(v) => whole_float(v)
            .map(Value::Integer)
            .ok_or_else(|| unparseable(v.to_string(), "integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| unparseable(s, "integer")),
        other => Err(unsupported("to_integer", &other)),
    }
}

pub fn to_float(value: Value) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::Float(v) => Ok(Value::Float(v)),
        Value::Integer(v) => Ok(Value::Float(v as f64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| unparseable(s, "float")),
        other => Err(unsupported("to_float", &other)),
    }
}

/// Accepts booleans, `0`/`1`, and the usual form-field spellings
/// (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`), case-insensitively.
pub fn to_boolean(value: Value) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::Bool(v) => Ok(Value::Bool(v)),
        Value::Integer(0) => Ok(Value::Bool(false)),
        Value::Integer(1) => Ok(Value::Bool(true)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(unparseable(s, "boolean")),
        },
        other => Err(unsupported("to_boolean", &other)),
    }
}

/// Dates pass through; `{year, month, day}` maps and ISO strings are parsed.
pub fn to_date(value: Value) -> CoercionResult {
    date_from(value, ISO_DATE)
}

/// Like [`to_date`], parsing strings with a `chrono` format string.
pub fn to_date_with_format(
    format: impl Into<String>,
) -> impl Fn(Value) -> CoercionResult + Send + Sync + 'static {
    let format = format.into();
    move |value| date_from(value, &format)
}

fn date_from(value: Value, format: &str) -> CoercionResult {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::Date(d) => Ok(Value::Date(d)),
        Value::Map(map) => {
            let part = |name: &'static str| -> std::result::Result<i64, CoerceError> {
                let raw = map.get(name).ok_or(CoerceError::MissingDateField(name))?;
                date_part(raw).ok_or(CoerceError::InvalidDateField {
                    field: name,
                    found: raw.kind(),
                })
            };
            let (year, month, day) = (part("year")?, part("month")?, part("day")?);
            let date = i32::try_from(year).ok().and_then(|y| {
                let month = u32::try_from(month).ok()?;
                let day = u32::try_from(day).ok()?;
                NaiveDate::from_ymd_opt(y, month, day)
            });
            date.map(Value::Date).ok_or_else(|| -> CoercionError {
                Box::new(CoerceError::InvalidDate { year, month, day })
            })
        }
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), format)
            .map(Value::Date)
            .map_err(|_| unparseable(s, "date")),
        other => Err(unsupported("to_date", &other)),
    }
}

/// Date components may arrive as numbers or numeric strings (form fields).
fn date_part(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(v) => Some(*v),
        Value::Float(v) => whole_float(*v),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `v` as an `i64` when it is a whole number that fits.
fn whole_float(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i64)
}

fn unparseable(value: String, target: &'static str) -> CoercionError {
    Box::new(CoerceError::Unparseable { value, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn coerce_error(result: CoercionResult) -> CoerceError {
        let err = result.unwrap_err();
        err.downcast_ref::<CoerceError>().unwrap().clone()
    }

    #[test]
    fn builtins_pass_nil_through() {
        for coerce in [
            upcase, downcase, strip, to_string, to_integer, to_float, to_boolean, to_date,
        ] {
            assert_eq!(coerce(Value::Nil).unwrap(), Value::Nil);
        }
    }

    #[test]
    fn string_case_coercions() {
        assert_eq!(upcase("hello".into()).unwrap(), Value::from("HELLO"));
        assert_eq!(downcase("HeLLo".into()).unwrap(), Value::from("hello"));
        assert_eq!(strip("  x ".into()).unwrap(), Value::from("x"));
    }

    #[test]
    fn upcase_rejects_non_strings() {
        assert_eq!(
            coerce_error(upcase(Value::Integer(1))),
            CoerceError::UnsupportedType {
                coercion: "upcase",
                found: "integer"
            }
        );
    }

    #[test]
    fn to_integer_parses_strings_and_whole_floats() {
        assert_eq!(to_integer(" 42 ".into()).unwrap(), Value::Integer(42));
        assert_eq!(to_integer(Value::Float(3.0)).unwrap(), Value::Integer(3));
        assert!(to_integer(Value::Float(3.5)).is_err());
        assert_eq!(to_integer(Value::Float(-2.0)).unwrap(), Value::Integer(-2));
        assert_eq!(
            coerce_error(to_integer("abc".into())),
            CoerceError::Unparseable {
                value: "abc".into(),
                target: "integer"
            }
        );
    }

    #[test]
    fn to_integer_rejects_floats_outside_i64() {
        assert_eq!(
            coerce_error(to_integer(Value::Float(1e20))),
            CoerceError::Unparseable {
                value: "100000000000000000000".into(),
                target: "integer"
            }
        );
        assert!(to_integer(Value::Float(-1e20)).is_err());
        assert!(to_integer(Value::Float(9_223_372_036_854_775_808.0)).is_err());
        assert!(to_integer(Value::Float(f64::INFINITY)).is_err());
        assert!(to_integer(Value::Float(f64::NAN)).is_err());
        assert_eq!(
            to_integer(Value::Float(-9_223_372_036_854_775_808.0)).unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn to_float_widens_integers() {
        assert_eq!(to_float(Value::Integer(2)).unwrap(), Value::Float(2.0));
        assert_eq!(to_float("2.5".into()).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn to_boolean_accepts_form_spellings() {
        assert_eq!(to_boolean("Yes".into()).unwrap(), Value::Bool(true));
        assert_eq!(to_boolean("off".into()).unwrap(), Value::Bool(false));
        assert_eq!(to_boolean(Value::Integer(1)).unwrap(), Value::Bool(true));
        assert!(to_boolean("maybe".into()).is_err());
        assert!(to_boolean(Value::Integer(2)).is_err());
    }

    #[test]
    fn to_string_renders_scalars() {
        assert_eq!(to_string(Value::Integer(5)).unwrap(), Value::from("5"));
        assert_eq!(to_string(date(2015, 1, 1)).unwrap(), Value::from("2015-01-01"));
        assert!(to_string(Value::List(vec![])).is_err());
    }

    #[test]
    fn to_date_from_map() {
        let raw = Value::from(json!({"year": 2015, "month": 1, "day": 1}));
        assert_eq!(to_date(raw).unwrap(), date(2015, 1, 1));
    }

    #[test]
    fn to_date_from_map_with_string_parts() {
        let raw = Value::from(json!({"year": "2015", "month": "02", "day": "3"}));
        assert_eq!(to_date(raw).unwrap(), date(2015, 2, 3));
    }

    #[test]
    fn to_date_reports_missing_and_invalid_parts() {
        let missing = Value::from(json!({"year": 2015, "month": 1}));
        assert_eq!(
            coerce_error(to_date(missing)),
            CoerceError::MissingDateField("day")
        );

        let invalid = Value::from(json!({"year": 2015, "month": 2, "day": 30}));
        assert_eq!(
            coerce_error(to_date(invalid)),
            CoerceError::InvalidDate {
                year: 2015,
                month: 2,
                day: 30
            }
        );
    }

    #[test]
    fn to_date_accepts_whole_float_parts() {
        let raw = Value::from(json!({"year": 2015.0, "month": 1.0, "day": 1}));
        assert_eq!(to_date(raw).unwrap(), date(2015, 1, 1));
    }

    #[test]
    fn to_date_reports_present_parts_of_the_wrong_type() {
        let fractional = Value::from(json!({"year": 2015.5, "month": 1, "day": 1}));
        assert_eq!(
            coerce_error(to_date(fractional)),
            CoerceError::InvalidDateField {
                field: "year",
                found: "float"
            }
        );

        let boolean = Value::from(json!({"year": 2015, "month": true, "day": 1}));
        assert_eq!(
            coerce_error(to_date(boolean)),
            CoerceError::InvalidDateField {
                field: "month",
                found: "boolean"
            }
        );
    }

    #[test]
    fn to_date_parses_strings_and_passes_dates() {
        assert_eq!(to_date("2015-01-01".into()).unwrap(), date(2015, 1, 1));
        assert_eq!(to_date(date(2020, 5, 6)).unwrap(), date(2020, 5, 6));
        assert!(to_date("01/01/2015".into()).is_err());
    }

    #[test]
    fn to_date_with_custom_format() {
        let coerce = to_date_with_format("%d/%m/%Y");
        assert_eq!(coerce("09/03/2015".into()).unwrap(), date(2015, 3, 9));
    }

    #[test]
    fn by_name_resolves_every_builtin() {
        let config = AttrformConfig::default();
        for name in BUILTIN_NAMES {
            assert!(by_name::<()>(name, &config).is_some(), "{name}");
        }
        assert!(by_name::<()>("shout", &config).is_none());
    }

    #[test]
    fn by_name_to_date_uses_configured_format() {
        let config = AttrformConfig {
            date_format: "%d.%m.%Y".into(),
            ..Default::default()
        };
        let coercion = by_name::<()>("to_date", &config).unwrap();
        assert_eq!(
            coercion.apply(&(), "01.02.2003".into()).unwrap(),
            date(2003, 2, 1)
        );
    }

    #[test]
    fn method_coercion_receives_instance() {
        fn suffix(instance: &String, value: Value) -> CoercionResult {
            Ok(Value::String(format!("{}{}", value.as_str().unwrap_or(""), instance)))
        }
        let coercion = Coercion::method(suffix);
        assert_eq!(
            coercion.apply(&"!".to_string(), "hi".into()).unwrap(),
            Value::from("hi!")
        );
    }
}
