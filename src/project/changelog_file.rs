use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// The changelog on disk, always replaced as a whole
pub struct ChangelogFile {
    path: PathBuf,
}

impl ChangelogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ChangelogFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; a changelog that does not exist yet reads as empty
    pub fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(ReleaseError::changelog(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    pub fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|e| {
            ReleaseError::changelog(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}
