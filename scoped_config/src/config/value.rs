//! Conversion of property text into typed values.

use std::error::Error;

use uncased::UncasedStr;

/// A type that can be read from a property value.
///
/// Numeric types use their standard [`str::parse`] grammar. `bool` is
/// lenient: a case-insensitive `true` is `true` and any other text is
/// `false`.
pub trait PropertyValue: Sized {
    /// Name used in error messages, e.g. `int`.
    const TYPE_NAME: &'static str;

    /// Parse `raw` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `raw` is not valid for the type.
    fn parse_property(raw: &str) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_property(raw: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(raw.to_owned())
    }
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse_property(raw: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UncasedStr::new(raw) == UncasedStr::new("true"))
    }
}

macro_rules! from_str_property {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_property(raw: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
                    Ok(raw.parse::<$ty>()?)
                }
            }
        )+
    };
}

from_str_property!(
    i8 => "byte",
    i16 => "short",
    i32 => "int",
    i64 => "long",
    u8 => "unsigned byte",
    u16 => "unsigned short",
    u32 => "unsigned int",
    u64 => "unsigned long",
    usize => "size",
    f32 => "float",
    f64 => "double",
);
