//! Property sources consumed by the loader.
//!
//! A [`KeyValueSource`] hands the loader a fully materialised list of raw
//! key/value pairs. Order within one source carries no meaning; order
//! *between* sources is the priority order and is owned by the
//! [`ResolutionContext`](crate::ResolutionContext).

mod env;
mod helpers;
mod map;
mod properties;
mod structured;

use std::fmt;

use crate::{RawEntry, ScopedResult};

pub use env::EnvSource;
pub use map::MapSource;
pub use properties::{PropertiesFile, PropertiesSyntaxError, parse_properties};
pub use structured::FigmentSource;

/// Provider of raw key/value pairs.
///
/// `entries` must return every pair or fail as a whole; the loader never
/// applies part of a source.
pub trait KeyValueSource: fmt::Debug + Send + Sync {
    /// Name used in diagnostics and error messages.
    fn name(&self) -> &str;

    /// Read every raw entry of this source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScopedError::SourceLoad`] when the backing data cannot
    /// be read or parsed.
    fn entries(&self) -> ScopedResult<Vec<RawEntry>>;
}
