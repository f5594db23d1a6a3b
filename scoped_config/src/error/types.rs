//! Primary error enum for scoped configuration flows.

use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Result alias used throughout the crate.
pub type ScopedResult<T> = Result<T, ScopedError>;

/// Errors that can occur while resolving or reading configuration.
///
/// Missing keys and malformed values are distinct variants so callers can
/// treat an absent setting differently from a broken one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScopedError {
    /// The resolution context failed a structural check before loading.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Context field that failed validation.
        field: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A property source could not be read or parsed.
    #[error("Failed to load property source '{source_name}': {source}")]
    SourceLoad {
        /// Name reported by the failing source.
        source_name: String,
        /// Underlying I/O or parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A typed accessor was called for an absent key without a default.
    #[error("No {expected} value exists for key '{key}' and no default value was specified")]
    MissingKey {
        /// Logical key that was requested.
        key: String,
        /// Name of the requested value type.
        expected: &'static str,
    },

    /// A present value could not be parsed as the requested type.
    #[error("Value '{value}' for key '{key}' is not a valid {expected}: {source}")]
    Format {
        /// Logical key that was requested.
        key: String,
        /// The unparseable text.
        value: String,
        /// Name of the requested value type.
        expected: &'static str,
        /// Parser error describing the failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration was read after it had been destroyed.
    #[error("Configuration has been destroyed; cannot read '{key}'")]
    Destroyed {
        /// Key (or operation) that was requested after teardown.
        key: String,
    },

    /// Several errors were reported together.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
