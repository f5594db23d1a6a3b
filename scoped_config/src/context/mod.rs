//! The frozen inputs of one resolution: sources, scopes and error policy.

mod builder;

use std::fmt;
use std::sync::Arc;

use crate::{KeyValueSource, SourceErrorPolicy};

pub use builder::ResolutionContextBuilder;

/// Validated inputs for [`ConfigResolver::resolve`](crate::ConfigResolver::resolve).
///
/// Sources are listed highest priority first, scopes most specific first.
/// Instances only come from [`ResolutionContextBuilder::build`] and cannot
/// change afterwards.
#[derive(Clone)]
pub struct ResolutionContext {
    sources: Vec<Arc<dyn KeyValueSource>>,
    scopes: Vec<String>,
    source_errors: SourceErrorPolicy,
}

impl ResolutionContext {
    /// Start configuring a context.
    #[must_use]
    pub fn builder() -> ResolutionContextBuilder {
        ResolutionContextBuilder::new()
    }

    /// Property sources in priority order; never empty.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn KeyValueSource>] {
        &self.sources
    }

    /// Requested scopes, most specific first. May be empty.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// How failing sources are handled.
    #[must_use]
    pub const fn source_error_policy(&self) -> SourceErrorPolicy {
        self.source_errors
    }
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|source| source.name()).collect();
        f.debug_struct("ResolutionContext")
            .field("sources", &names)
            .field("scopes", &self.scopes)
            .field("source_errors", &self.source_errors)
            .finish()
    }
}
