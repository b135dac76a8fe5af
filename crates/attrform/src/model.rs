//! Typed models with generated accessors.
//!
//! The [`model!`](crate::model!) macro declares a struct, one read accessor
//! per declared attribute, and a [`Model`] impl whose registry is built once
//! on first use:
//!
//! ```
//! use attrform::{coerce, model, input, CoercionResult, UndefinedAttributes, Value};
//!
//! model! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Signup {
//!         email { required: true, coerce: coerce::downcase },
//!         born { coerce_with: Signup::to_birthday },
//!         plan { default: "free" },
//!     }
//!     undefined_attributes = UndefinedAttributes::Ignore;
//! }
//!
//! impl Signup {
//!     fn to_birthday(&self, input: Value) -> CoercionResult {
//!         coerce::to_date(input)
//!     }
//! }
//!
//! let signup = Signup::new(input! { email => "ME@EXAMPLE.COM", utm => "x" }).unwrap();
//! assert_eq!(signup.email().as_str(), Some("me@example.com"));
//! assert_eq!(signup.plan().as_str(), Some("free"));
//! assert!(signup.born().is_nil());
//! ```
//!
//! Every option key is the name of an [`Attribute`](crate::Attribute)
//! builder method (`coerce`, `coerce_with`, `coercion`, `required`,
//! `default`). Declaring the same attribute twice inside `model!` does not
//! compile, since it would produce two accessors with one name.
//!
//! `new` and `to_hash` are reserved: the macro generates inherent methods
//! with those names, so an attribute called either one fails to compile.
//!
//! ```compile_fail
//! attrform::model! {
//!     struct Clash {
//!         to_hash,
//!     }
//! }
//! ```
//!
//! Instances only receive values through construction. Neither a blank
//! instance nor write access to a built one is reachable from outside the
//! crate:
//!
//! ```compile_fail
//! use attrform::{model, Model, Record};
//!
//! model! {
//!     struct Strict {
//!         a_required { required: true },
//!     }
//! }
//!
//! let unchecked = Strict::from_record(Record::default(), attrform::__private::Seal(()));
//! ```
//!
//! ```compile_fail
//! use attrform::{input, model, Record, Storage};
//!
//! model! {
//!     struct Strict {
//!         a_required { required: true },
//!     }
//! }
//!
//! let mut strict = Strict::new(input! { a_required => 1 }).unwrap();
//! *strict.record_mut(attrform::__private::Seal(())) = Record::default();
//! ```

use crate::__private::Seal;
use crate::attributes::ValueMap;
use crate::error::Result;
use crate::input::Input;
use crate::record::Record;
use crate::schema::Schema;

/// Access to the [`Record`] backing an instance.
pub trait Storage {
    fn record(&self) -> &Record;

    /// Write access for the construction pipeline, which alone holds a [`Seal`].
    #[doc(hidden)]
    fn record_mut(&mut self, seal: Seal) -> &mut Record;
}

impl Storage for Record {
    fn record(&self) -> &Record {
        self
    }

    fn record_mut(&mut self, _seal: Seal) -> &mut Record {
        self
    }
}

/// A type with a registry of declared attributes.
///
/// Usually implemented by [`model!`](crate::model!).
pub trait Model: Storage + Sized + 'static {
    /// Build the registry. Called once per type.
    fn declare() -> Schema<Self>;

    /// The type's registry, built from [`Model::declare`] on first use.
    fn schema() -> &'static Schema<Self>;

    /// Wrap a record without validation. Requires a [`Seal`], so only the
    /// pipeline can call it.
    #[doc(hidden)]
    fn from_record(record: Record, seal: Seal) -> Self;

    /// Validate, default and coerce `input` into a new instance.
    fn construct(input: impl Into<Input>) -> Result<Self> {
        let schema = Self::schema();
        let blank = Self::from_record(Record::with_capacity(schema.len()), Seal(()));
        schema.construct(input.into(), blank)
    }

    /// Declared attribute names, in declaration order.
    fn attribute_names() -> Vec<&'static str> {
        Self::schema().names().collect()
    }

    /// Ordered mapping of every declared attribute to its stored value.
    fn to_hash(&self) -> ValueMap {
        self.record().to_hash()
    }
}

#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $ty:ident {
            $( $attr:ident $( { $( $opt:ident : $val:expr ),* $(,)? } )? ),* $(,)?
        }
        $( undefined_attributes = $policy:expr ; )?
    ) => {
        $(#[$meta])*
        $vis struct $ty {
            record: $crate::Record,
        }

        #[allow(dead_code)]
        impl $ty {
            /// Validate, default and coerce `input` into a new instance.
            $vis fn new(input: impl ::core::convert::Into<$crate::Input>) -> $crate::Result<Self> {
                <Self as $crate::Model>::construct(input)
            }

            $(
                pub fn $attr(&self) -> &$crate::Value {
                    self.record.value(stringify!($attr))
                }
            )*

            /// Ordered mapping of every declared attribute to its stored value.
            pub fn to_hash(&self) -> $crate::ValueMap {
                self.record.to_hash()
            }
        }

        impl $crate::Storage for $ty {
            fn record(&self) -> &$crate::Record {
                &self.record
            }

            fn record_mut(&mut self, _seal: $crate::__private::Seal) -> &mut $crate::Record {
                &mut self.record
            }
        }

        impl $crate::Model for $ty {
            fn declare() -> $crate::Schema<Self> {
                #[allow(unused_mut)]
                let mut schema = $crate::Schema::<Self>::new(stringify!($ty));
                $(
                    schema.declare_attribute(
                        $crate::Attribute::<Self>::new(stringify!($attr)) $( $( .$opt($val) )* )?
                    );
                )*
                $( schema.set_undefined_attribute_policy($policy); )?
                schema
            }

            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: $crate::__private::Lazy<$crate::Schema<$ty>> =
                    $crate::__private::Lazy::new(<$ty as $crate::Model>::declare);
                &SCHEMA
            }

            fn from_record(record: $crate::Record, _seal: $crate::__private::Seal) -> Self {
                Self { record }
            }
        }

        impl $crate::__private::Serialize for $ty {
            fn serialize<S: $crate::__private::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                $crate::__private::Serialize::serialize(&self.record, serializer)
            }
        }
    };
}
