//! Library half of the `scopectl` binary.
//!
//! [`run`] turns parsed [`cli::Args`] into a [`ResolutionContext`], resolves
//! it and renders the result, so the whole pipeline can be tested without
//! spawning a process.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

use std::sync::Arc;

use scoped_config::{
    ConfigResolver, EnvScopePath, EnvSource, FigmentSource, KeyValueSource, ParenthesesResolver,
    PropertiesFile, ResolutionContext, SourceErrorPolicy,
};

use crate::cli::Args;
use crate::error::ScopectlError;

/// Build the resolution context described by `args`.
///
/// # Errors
///
/// Returns [`ScopectlError::Resolve`] when the arguments describe an invalid
/// context, such as an empty scope path segment.
pub fn build_context(args: &Args) -> Result<ResolutionContext, ScopectlError> {
    let mut builder = ResolutionContext::builder();
    if let Some(prefix) = &args.env_prefix {
        let mut env = EnvSource::prefixed(prefix).split("__");
        if let Some(scope) = &args.env_scope {
            env = env.scope(scope.clone());
        }
        builder = builder.source(env);
    }
    for path in &args.sources {
        builder = builder.shared_source(file_source(path, args.should_skip_missing));
    }
    if args.unscoped {
        builder = builder.without_scopes();
    } else {
        if !args.scopes.is_empty() {
            builder = builder.scopes(args.scopes.iter().cloned());
        }
        if let Some(path) = &args.scope_path {
            builder = builder.scope_path(path);
        }
        if let Some(var) = &args.scope_env {
            builder = builder.discover_scopes(&EnvScopePath::new(var.clone()));
        }
        if !args.should_skip_default {
            builder = builder.fallback_to_default();
        }
    }
    if args.should_skip_missing {
        builder = builder.on_source_error(SourceErrorPolicy::Skip);
    }
    Ok(builder.build()?)
}

fn file_source(path: &camino::Utf8Path, optional: bool) -> Arc<dyn KeyValueSource> {
    if path.extension() == Some("toml") {
        return Arc::new(FigmentSource::toml_file(path));
    }
    let file = PropertiesFile::new(path);
    if optional {
        Arc::new(file.optional())
    } else {
        Arc::new(file)
    }
}

/// Resolve the sources named in `args` and render the output text.
///
/// # Errors
///
/// Returns [`ScopectlError`] when the context is invalid, a source fails
/// under the abort policy, a requested key is missing or rendering fails.
pub fn run(args: &Args) -> Result<String, ScopectlError> {
    let context = build_context(args)?;
    tracing::debug!(?context, format = args.format.as_str(), "resolving");
    let config = ConfigResolver::new(ParenthesesResolver).resolve(&context)?;
    match &args.key {
        Some(key) => output::render_key(&config, key, args.format),
        None => output::render(&config, args.format),
    }
}
