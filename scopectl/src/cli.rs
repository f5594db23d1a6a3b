//! Command-line interface definitions for `scopectl`.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// How resolved properties are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `scope: key=value` line per property.
    #[default]
    Text,
    /// `.properties` text with logical keys, suitable for reloading.
    Properties,
    /// A JSON object mapping logical keys to values.
    Json,
}

impl OutputFormat {
    /// Returns the CLI-friendly string for this output format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Properties => "properties",
            Self::Json => "json",
        }
    }
}

/// Parsed CLI arguments for `scopectl`.
#[derive(Debug, Parser)]
#[command(name = "scopectl")]
#[command(about = "Resolve scope-annotated property sources into one value per key")]
#[command(version)]
pub struct Args {
    /// Property sources, highest priority first. Files ending in `.toml` are
    /// read as TOML, everything else as `.properties`.
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<Utf8PathBuf>,
    /// Read environment variables with this prefix as the highest-priority
    /// source.
    #[arg(long, value_name = "PREFIX")]
    pub env_prefix: Option<String>,
    /// Scope attached to every environment variable read via `--env-prefix`.
    #[arg(long, value_name = "SCOPE", requires = "env_prefix")]
    pub env_scope: Option<String>,
    /// Scope to search, most specific first (repeatable).
    #[arg(short, long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,
    /// Dotted scope path expanded into scopes, e.g. `prod.eu`.
    #[arg(long, value_name = "PATH")]
    pub scope_path: Option<String>,
    /// Environment variable holding a dotted scope path.
    #[arg(long, value_name = "VAR")]
    pub scope_env: Option<String>,
    /// Do not fall back to the `default` scope.
    #[arg(long = "no-default")]
    pub should_skip_default: bool,
    /// Disable scope filtering and print every loaded entry's first value.
    #[arg(long, conflicts_with_all = ["scopes", "scope_path", "scope_env"])]
    pub unscoped: bool,
    /// Skip sources that fail to load instead of aborting.
    #[arg(long = "skip-missing")]
    pub should_skip_missing: bool,
    /// Print only this key.
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write output to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long)]
    pub verbose: bool,
}
