//! Typed, defaulting read access to a resolved configuration.

use std::collections::BTreeSet;

use super::value::PropertyValue;
use crate::{ScopedError, ScopedResult};

/// Read access to resolved properties.
///
/// Implementors only provide [`keys`](Self::keys) and
/// [`lookup`](Self::lookup); every typed accessor is built on
/// [`get_string_or`](Self::get_string_or). The `_or` forms take anything
/// convertible to `Option<T>`, so both `get_int_or("n", 5)` and
/// `get_int_or("n", None)` work.
///
/// A missing key without a default is [`ScopedError::MissingKey`]. A key
/// whose value cannot be parsed is [`ScopedError::Format`] even when a
/// default was supplied.
pub trait Configuration {
    /// Every logical key that has a value.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    fn keys(&self) -> ScopedResult<BTreeSet<&str>>;

    /// The raw value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Destroyed`] after teardown.
    fn lookup(&self, key: &str) -> ScopedResult<Option<&str>>;

    /// The value for `key`, or `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::MissingKey`] when the key is absent and no
    /// default is given, or [`ScopedError::Destroyed`] after teardown.
    fn get_string_or<'d>(
        &self,
        key: &str,
        default: impl Into<Option<&'d str>>,
    ) -> ScopedResult<String> {
        match self.lookup(key)? {
            Some(value) => Ok(value.to_owned()),
            None => default
                .into()
                .map(str::to_owned)
                .ok_or_else(|| ScopedError::missing_key(key, String::TYPE_NAME)),
        }
    }

    /// The value for `key`.
    ///
    /// # Errors
    ///
    /// As [`get_string_or`](Self::get_string_or) without a default.
    fn get_string(&self, key: &str) -> ScopedResult<String> {
        self.get_string_or(key, None)
    }

    /// The value for `key` parsed as `T`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ScopedError::Format`] when the value does not parse,
    /// [`ScopedError::MissingKey`] when it is absent without a default, or
    /// [`ScopedError::Destroyed`] after teardown.
    fn get_or<T: PropertyValue>(&self, key: &str, default: impl Into<Option<T>>) -> ScopedResult<T> {
        match self.get_string_or(key, None) {
            Ok(raw) => {
                T::parse_property(&raw).map_err(|err| ScopedError::format(key, raw, T::TYPE_NAME, err))
            }
            Err(ScopedError::MissingKey { .. }) => default
                .into()
                .ok_or_else(|| ScopedError::missing_key(key, T::TYPE_NAME)),
            Err(err) => Err(err),
        }
    }

    /// The value for `key` parsed as `T`.
    ///
    /// # Errors
    ///
    /// As [`get_or`](Self::get_or) without a default.
    fn get<T: PropertyValue>(&self, key: &str) -> ScopedResult<T> {
        self.get_or(key, None)
    }

    /// `key` as an `i32`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_int(&self, key: &str) -> ScopedResult<i32> {
        self.get(key)
    }

    /// `key` as an `i32`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_int_or(&self, key: &str, default: impl Into<Option<i32>>) -> ScopedResult<i32> {
        self.get_or(key, default)
    }

    /// `key` as an `i64`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_long(&self, key: &str) -> ScopedResult<i64> {
        self.get(key)
    }

    /// `key` as an `i64`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_long_or(&self, key: &str, default: impl Into<Option<i64>>) -> ScopedResult<i64> {
        self.get_or(key, default)
    }

    /// `key` as an `i16`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_short(&self, key: &str) -> ScopedResult<i16> {
        self.get(key)
    }

    /// `key` as an `i16`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_short_or(&self, key: &str, default: impl Into<Option<i16>>) -> ScopedResult<i16> {
        self.get_or(key, default)
    }

    /// `key` as a lenient `bool`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or); booleans never fail to parse.
    fn get_bool(&self, key: &str) -> ScopedResult<bool> {
        self.get(key)
    }

    /// `key` as a lenient `bool`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_bool_or(&self, key: &str, default: impl Into<Option<bool>>) -> ScopedResult<bool> {
        self.get_or(key, default)
    }

    /// `key` as an `f64`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_double(&self, key: &str) -> ScopedResult<f64> {
        self.get(key)
    }

    /// `key` as an `f64`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_double_or(&self, key: &str, default: impl Into<Option<f64>>) -> ScopedResult<f64> {
        self.get_or(key, default)
    }

    /// `key` as an `f32`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_float(&self, key: &str) -> ScopedResult<f32> {
        self.get(key)
    }

    /// `key` as an `f32`, or `default`.
    ///
    /// # Errors
    ///
    /// See [`get_or`](Self::get_or).
    fn get_float_or(&self, key: &str, default: impl Into<Option<f32>>) -> ScopedResult<f32> {
        self.get_or(key, default)
    }
}
