//! Java-style `.properties` files.

mod parser;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{KeyValueSource, RawEntry, ScopedError, ScopedResult};

use super::helpers;

pub use parser::{PropertiesSyntaxError, parse_properties};

/// A `.properties` file read from disk on every [`KeyValueSource::entries`]
/// call.
///
/// Files are decoded as UTF-8. A required file that does not exist is a
/// [`ScopedError::SourceLoad`]; an [optional](Self::optional) one contributes
/// no entries instead.
#[derive(Clone, Debug)]
pub struct PropertiesFile {
    path: Utf8PathBuf,
    required: bool,
}

impl PropertiesFile {
    /// Source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// Treat a missing file as empty rather than as an error.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl KeyValueSource for PropertiesFile {
    fn name(&self) -> &str {
        self.path.as_str()
    }

    fn entries(&self) -> ScopedResult<Vec<RawEntry>> {
        let text = match helpers::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if !self.required && err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path, "optional properties file not found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ScopedError::source_load(self.name(), err)),
        };
        parse_properties(&text).map_err(|err| ScopedError::source_load(self.name(), err))
    }
}
