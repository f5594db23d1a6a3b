//! Scope-aware property resolution.
//!
//! Property keys may carry a scope annotation such as `(production)db.url`.
//! Several sources can define the same logical key for different scopes;
//! resolution walks a caller-supplied scope list, most specific first, and
//! keeps one winning value per logical key.
//!
//! ```
//! use scoped_config::{Configuration, MapSource, ResolutionContext, ResolvedConfiguration};
//!
//! let context = ResolutionContext::builder()
//!     .source(MapSource::new(
//!         "inline",
//!         [("(default)db.port", "5432"), ("(prod)db.port", "6432")],
//!     ))
//!     .scope("prod")
//!     .fallback_to_default()
//!     .build()?;
//! let config = ResolvedConfiguration::load(&context)?;
//! assert_eq!(config.get_int("db.port")?, 6432);
//! # Ok::<_, scoped_config::ScopedError>(())
//! ```

mod config;
mod context;
mod entry;
mod error;
mod export;
mod filter;
mod key;
mod loader;
mod scope_path;
mod source;

pub use config::{ConfigResolver, Configuration, PropertyValue, ResolvedConfiguration};
pub use context::{ResolutionContext, ResolutionContextBuilder};
pub use entry::{RawEntry, ResolvedEntry};
pub use error::{AggregatedErrors, ScopedError, ScopedResult};
pub use export::PropertySnapshot;
pub use filter::filter;
pub use key::{KeyResolver, ParenthesesResolver, ScopeKey};
pub use loader::{LoadOutcome, SourceErrorPolicy, SourceLoader};
pub use scope_path::{
    DEFAULT_SCOPE, EnvScopePath, ScopePathProvider, StaticScopePath, expand_scope_path,
};
pub use source::{
    EnvSource, FigmentSource, KeyValueSource, MapSource, PropertiesFile, PropertiesSyntaxError,
    parse_properties,
};
