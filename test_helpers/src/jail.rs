//! Running test setup inside a [`figment::Jail`].
//!
//! The jail gives each test a fresh working directory and restores any
//! environment variables it sets, so property files can be created with
//! relative paths.

use std::fmt::Write as _;

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Run `f` inside a jail and return its output as an [`anyhow::Result`].
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Convert any displayable error into a [`figment::Error`] for use inside a
/// jail closure.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adapter that receives owned errors"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Write `pairs` as a `.properties` file called `name` in the jail directory
/// and return its path relative to the jail.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn write_properties(
    jail: &figment::Jail,
    name: &str,
    pairs: &[(&str, &str)],
) -> figment::error::Result<Utf8PathBuf> {
    let mut text = String::new();
    for (key, value) in pairs {
        writeln!(text, "{key}={value}").map_err(figment_error)?;
    }
    jail.create_file(name, &text)?;
    Ok(Utf8PathBuf::from(name))
}
