//! Several problems reported by one build or load.

use std::{fmt, sync::Arc};

use super::ScopedError;

/// The problems found by a single [`build`](crate::ResolutionContextBuilder::build)
/// or by a load that skipped failing sources, in the order they were found.
///
/// # Examples
///
/// ```
/// use scoped_config::{ResolutionContext, ScopedError};
///
/// let err = ResolutionContext::builder().build().unwrap_err();
/// let ScopedError::Aggregate(problems) = err else { unreachable!() };
/// assert_eq!(problems.len(), 2);
/// ```
#[derive(Debug)]
pub struct AggregatedErrors {
    errors: Vec<Arc<ScopedError>>,
}

impl AggregatedErrors {
    pub(super) const fn new(errors: Vec<Arc<ScopedError>>) -> Self {
        Self { errors }
    }

    /// The collected errors in report order.
    pub fn iter(&self) -> impl Iterator<Item = &ScopedError> {
        self.errors.iter().map(Arc::as_ref)
    }

    /// How many errors were collected.
    #[must_use]
    #[expect(
        clippy::len_without_is_empty,
        reason = "an aggregate is never built without errors"
    )]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.iter();
        if let Some(first) = errors.next() {
            write!(f, "  - {first}")?;
        }
        for err in errors {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}
