//! Error types produced while building, loading and reading a configuration.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{ScopedError, ScopedResult};
