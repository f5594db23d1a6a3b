//! Constructors for `ScopedError`.

use std::error::Error;
use std::sync::Arc;

use super::{AggregatedErrors, ScopedError};

impl ScopedError {
    /// Collapse the problems reported by one operation into a single error.
    ///
    /// Nothing yields `None`. A lone error that is not shared elsewhere is
    /// returned as is; anything else becomes [`Self::Aggregate`].
    pub(crate) fn combine(mut errors: Vec<Arc<Self>>) -> Option<Self> {
        if errors.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(errors))));
        }
        let only = errors.pop()?;
        Some(Arc::try_unwrap(only).unwrap_or_else(|shared| {
            Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
        }))
    }

    /// Construct a validation error for a context field.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::ScopedError;
    /// let e = ScopedError::validation("sources", "empty");
    /// assert!(matches!(e, ScopedError::Validation { .. }));
    /// ```
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Construct a load failure for the source called `source_name`.
    #[must_use]
    pub fn source_load(
        source_name: impl Into<String>,
        err: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::SourceLoad {
            source_name: source_name.into(),
            source: err.into(),
        }
    }

    /// Construct a missing-key error for a value of type `expected`.
    #[must_use]
    pub fn missing_key(key: impl Into<String>, expected: &'static str) -> Self {
        Self::MissingKey {
            key: key.into(),
            expected,
        }
    }

    /// Construct a format error carrying the unparseable `value`.
    #[must_use]
    pub fn format(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
        err: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Format {
            key: key.into(),
            value: value.into(),
            expected,
            source: err.into(),
        }
    }

    /// Construct the error returned by accessors after teardown.
    #[must_use]
    pub fn destroyed(key: impl Into<String>) -> Self {
        Self::Destroyed { key: key.into() }
    }

    /// Returns the configuration key this error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key, .. } | Self::Format { key, .. } | Self::Destroyed { key } => {
                Some(key.as_str())
            }
            _ => None,
        }
    }
}
