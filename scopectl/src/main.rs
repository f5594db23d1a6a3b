//! CLI entrypoint for `scopectl`.

use std::io::Write as _;

use clap::Parser;
use scopectl::cli::Args;
use scopectl::error::ScopectlError;
use scopectl::{logging, output};

fn main() -> Result<(), ScopectlError> {
    let args = Args::parse();
    logging::init(args.verbose);
    let rendered = scopectl::run(&args)?;
    match &args.output {
        Some(path) => output::write_output(path, &rendered),
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(|source| ScopectlError::Io {
                path: "<stdout>".into(),
                source,
            }),
    }
}
