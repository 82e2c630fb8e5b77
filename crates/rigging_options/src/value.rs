//! Textual value parsing for option fields.
//!
//! - [`ScalarValue`] - a single value parsed from text (`String`, `bool`,
//!   numbers, paths, user enums via [`scalar_value!`](crate::scalar_value))
//! - [`OptionValue`] - what an option field stores; every scalar, plus
//!   `Option<T>` and the accumulating `Vec<T>`

use std::path::PathBuf;

/// A value that can be parsed from a single textual assignment.
pub trait ScalarValue: Sized {
    /// Short label shown in help text, e.g. `"string"`.
    fn type_label() -> &'static str;

    /// Parses the raw text.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the text is not a valid value.
    fn parse(raw: &str) -> Result<Self, String>;
}

/// The type of an option field.
///
/// Assigning to a scalar field replaces the previous value. Assigning to a
/// `Vec<T>` field appends, so repeated assignments accumulate.
pub trait OptionValue {
    /// Short label shown in help text.
    fn type_label() -> &'static str;

    /// Whether repeated assignments accumulate instead of overriding.
    fn is_collection() -> bool {
        false
    }

    /// Applies one textual assignment to the field.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the text cannot be parsed. The
    /// field is left untouched in that case.
    fn apply(&mut self, raw: &str) -> Result<(), String>;
}

impl<T: ScalarValue> OptionValue for T {
    fn type_label() -> &'static str {
        T::type_label()
    }

    fn apply(&mut self, raw: &str) -> Result<(), String> {
        *self = T::parse(raw)?;
        Ok(())
    }
}

impl<T: ScalarValue> OptionValue for Option<T> {
    fn type_label() -> &'static str {
        T::type_label()
    }

    fn apply(&mut self, raw: &str) -> Result<(), String> {
        *self = Some(T::parse(raw)?);
        Ok(())
    }
}

impl<T: ScalarValue> OptionValue for Vec<T> {
    fn type_label() -> &'static str {
        T::type_label()
    }

    fn is_collection() -> bool {
        true
    }

    fn apply(&mut self, raw: &str) -> Result<(), String> {
        self.push(T::parse(raw)?);
        Ok(())
    }
}

/// Implements [`ScalarValue`] for a type through its `FromStr` impl.
///
/// The `FromStr` error must implement `Display`.
///
/// ```
/// use rigging_options::{ScalarValue, scalar_value};
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Debug, Info }
///
/// impl std::str::FromStr for Level {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         match s.to_ascii_uppercase().as_str() {
///             "DEBUG" => Ok(Level::Debug),
///             "INFO" => Ok(Level::Info),
///             other => Err(format!("unknown level '{other}'")),
///         }
///     }
/// }
///
/// scalar_value!(Level, "level");
///
/// assert_eq!(Level::parse("debug"), Ok(Level::Debug));
/// assert_eq!(<Level as ScalarValue>::type_label(), "level");
/// ```
#[macro_export]
macro_rules! scalar_value {
    ($ty:ty, $label:literal) => {
        impl $crate::ScalarValue for $ty {
            fn type_label() -> &'static str {
                $label
            }

            fn parse(raw: &str) -> ::core::result::Result<Self, ::std::string::String> {
                raw.parse::<$ty>()
                    .map_err(|err| ::std::string::ToString::to_string(&err))
            }
        }
    };
}

scalar_value!(String, "string");
scalar_value!(PathBuf, "path");
scalar_value!(char, "char");
scalar_value!(i8, "integer");
scalar_value!(i16, "integer");
scalar_value!(i32, "integer");
scalar_value!(i64, "integer");
scalar_value!(isize, "integer");
scalar_value!(u8, "integer");
scalar_value!(u16, "integer");
scalar_value!(u32, "integer");
scalar_value!(u64, "integer");
scalar_value!(usize, "integer");
scalar_value!(f32, "float");
scalar_value!(f64, "float");

impl ScalarValue for bool {
    fn type_label() -> &'static str {
        "boolean"
    }

    fn parse(raw: &str) -> Result<Self, String> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(format!("expected 'true' or 'false', got '{raw}'"))
        }
    }
}
