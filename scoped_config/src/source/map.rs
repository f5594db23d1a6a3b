//! In-memory key/value source.

use crate::{KeyValueSource, RawEntry, ScopedResult};

/// Source backed by pairs already held in memory.
///
/// # Examples
///
/// ```
/// use scoped_config::{KeyValueSource, MapSource};
///
/// let source = MapSource::new("defaults", [("(default)port", "8080")]);
/// assert_eq!(source.entries()?.len(), 1);
/// # Ok::<_, scoped_config::ScopedError>(())
/// ```
#[derive(Clone, Debug)]
pub struct MapSource {
    name: String,
    entries: Vec<RawEntry>,
}

impl MapSource {
    /// Create a source called `name` from any iterator of pairs.
    #[must_use]
    pub fn new<I, E>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        Self {
            name: name.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one more pair.
    #[must_use]
    pub fn with(mut self, raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(RawEntry::new(raw_key, value));
        self
    }
}

impl KeyValueSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> ScopedResult<Vec<RawEntry>> {
        Ok(self.entries.clone())
    }
}
