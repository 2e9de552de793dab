//! Project files touched by a release: the manifest carrying the version and
//! the changelog.
//!
//! Manifests are found by walking up from a start directory, the same way cargo
//! and npm locate their project root.

pub mod cargo;
pub mod changelog_file;
pub mod npm;

pub use cargo::CargoManifest;
pub use changelog_file::ChangelogFile;
pub use npm::PackageJson;

use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};

/// Which manifest format holds the project version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    /// Nearest `Cargo.toml` or `package.json`, `Cargo.toml` first
    #[default]
    Auto,
    Cargo,
    Npm,
}

impl ManifestKind {
    fn file_names(&self) -> &'static [&'static str] {
        match self {
            ManifestKind::Auto => &[cargo::FILE_NAME, npm::FILE_NAME],
            ManifestKind::Cargo => &[cargo::FILE_NAME],
            ManifestKind::Npm => &[npm::FILE_NAME],
        }
    }
}

/// A project descriptor file whose version field a release rewrites
pub trait ProjectManifest {
    /// Location of the manifest file
    fn path(&self) -> &Path;

    /// Directory containing the manifest
    fn root(&self) -> &Path {
        self.path().parent().unwrap_or_else(|| Path::new("."))
    }

    fn read_version(&self) -> Result<Version>;

    /// Replace the version field, leaving the rest of the file as it was
    fn write_version(&self, version: &Version) -> Result<()>;
}

/// Find the nearest manifest of `kind` in `start` or one of its parents
pub fn discover(start: &Path, kind: ManifestKind) -> Result<Box<dyn ProjectManifest>> {
    for dir in start.ancestors() {
        for name in kind.file_names() {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(open(candidate));
            }
        }
    }

    Err(ReleaseError::manifest(
        start,
        format!(
            "no {} found here or in any parent directory",
            kind.file_names().join(" or ")
        ),
    ))
}

/// Open a manifest by path, picking the format from the file name
pub fn open(path: PathBuf) -> Box<dyn ProjectManifest> {
    if path.file_name().and_then(|n| n.to_str()) == Some(npm::FILE_NAME) {
        Box::new(PackageJson::new(path))
    } else {
        Box::new(CargoManifest::new(path))
    }
}
