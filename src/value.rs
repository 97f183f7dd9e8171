//! Typed values
//!
//! Strict conversion between element/attribute text and Rust values.
//! Surrounding whitespace is trimmed; anything else left unconsumed is an
//! error. Sequences are whitespace-separated.

use std::any::type_name;

use crate::error::{Error, Result};

/// Parse a value out of element or attribute text
pub trait FromValue: Sized {
    fn from_value(value: &str) -> Result<Self>;
}

/// Render a value as element or attribute text
pub trait ToValue {
    fn to_value(&self) -> String;
}

macro_rules! impl_parsed {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &str) -> Result<Self> {
                    value
                        .trim()
                        .parse::<$t>()
                        .map_err(|e| Error::conversion(value, type_name::<$t>(), e.to_string()))
                }
            }

            impl ToValue for $t {
                fn to_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_parsed!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl FromValue for bool {
    fn from_value(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed == "1" || trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed == "0" || trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::conversion(
                value,
                "bool",
                "expected true, false, 1 or 0",
            ))
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl FromValue for char {
    fn from_value(value: &str) -> Result<Self> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            (None, _) => Err(Error::conversion(value, "char", "empty value")),
            (Some(_), Some(_)) => Err(Error::conversion(value, "char", "more than one character")),
        }
    }
}

impl ToValue for char {
    fn to_value(&self) -> String {
        self.to_string()
    }
}

/// Strings are taken verbatim, without trimming
impl FromValue for String {
    fn from_value(value: &str) -> Result<Self> {
        Ok(value.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> String {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> String {
        (**self).to_value()
    }
}

/// Any number of whitespace-separated values
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &str) -> Result<Self> {
        value.split_whitespace().map(T::from_value).collect()
    }
}

/// Exactly `N` whitespace-separated values
impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: &str) -> Result<Self> {
        let items = Vec::<T>::from_value(value)?;
        let found = items.len();
        items.try_into().map_err(|_| {
            Error::conversion(
                value,
                type_name::<Self>(),
                format!("expected {} values, found {}", N, found),
            )
        })
    }
}

/// Blank text is `None`
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}

fn join<T: ToValue>(items: &[T]) -> String {
    items
        .iter()
        .map(ToValue::to_value)
        .collect::<Vec<_>>()
        .join(" ")
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> String {
        join(self)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> String {
        join(self)
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> String {
        join(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> String {
        self.as_ref().map(ToValue::to_value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_trimmed() {
        assert_eq!(i32::from_value("  -42\n").unwrap(), -42);
        assert_eq!(f64::from_value("2e-3").unwrap(), 0.002);
        assert_eq!(u8::from_value("255").unwrap(), 255);
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(i32::from_value("12abc").is_err());
        assert!(f64::from_value("1.5 2").is_err());
        assert!(u8::from_value("256").is_err());
        assert!(i32::from_value("").is_err());
    }

    #[test]
    fn test_conversion_error_names_target() {
        match f64::from_value("pi") {
            Err(Error::Conversion { value, target, .. }) => {
                assert_eq!(value, "pi");
                assert_eq!(target, "f64");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bool() {
        for yes in ["true", "TRUE", " True ", "1"] {
            assert!(bool::from_value(yes).unwrap(), "{yes:?}");
        }
        for no in ["false", "False", "0"] {
            assert!(!bool::from_value(no).unwrap(), "{no:?}");
        }
        assert!(bool::from_value("yes").is_err());
        assert!(bool::from_value("2").is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(char::from_value(" x ").unwrap(), 'x');
        assert!(char::from_value("xy").is_err());
        assert!(char::from_value("  ").is_err());
    }

    #[test]
    fn test_string_verbatim() {
        assert_eq!(String::from_value("  padded ").unwrap(), "  padded ");
    }

    #[test]
    fn test_fixed_arrays() {
        assert_eq!(
            <[f64; 3]>::from_value("1.2 -4 2e-3").unwrap(),
            [1.2, -4.0, 0.002]
        );
        assert!(matches!(
            <[f64; 2]>::from_value("1.2 -4 2e-3"),
            Err(Error::Conversion { .. })
        ));
        assert!(<[i32; 2]>::from_value("1").is_err());
    }

    #[test]
    fn test_vec_any_length() {
        assert_eq!(Vec::<i32>::from_value("").unwrap(), Vec::<i32>::new());
        assert_eq!(Vec::<i32>::from_value("1\n 2\t3").unwrap(), vec![1, 2, 3]);
        assert!(Vec::<i32>::from_value("1 x").is_err());
    }

    #[test]
    fn test_option() {
        assert_eq!(Option::<i32>::from_value("   ").unwrap(), None);
        assert_eq!(Option::<i32>::from_value("7").unwrap(), Some(7));
        assert!(Option::<i32>::from_value("seven").is_err());
    }

    #[test]
    fn test_to_value() {
        assert_eq!([1.5f64, -2.0].to_value(), "1.5 -2");
        assert_eq!(vec![1, 2, 3].to_value(), "1 2 3");
        assert_eq!(true.to_value(), "true");
        assert_eq!(None::<i32>.to_value(), "");
        assert_eq!("as is".to_value(), "as is");
    }
}
