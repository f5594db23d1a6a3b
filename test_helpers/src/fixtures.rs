//! Scratch directories populated with property files.

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
///
/// # Examples
///
/// ```
/// use scoped_config_test_helpers::fixtures::PropertiesDir;
///
/// let dir = PropertiesDir::new()?;
/// let path = dir.write("app.properties", "(default)port=8080\n")?;
/// assert!(path.ends_with("app.properties"));
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct PropertiesDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl PropertiesDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary directory is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `name` and return the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
