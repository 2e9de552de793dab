use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use toml_edit::{DocumentMut, Item, Value};

use crate::domain::version::parse_version;
use crate::error::{ReleaseError, Result};
use crate::project::ProjectManifest;

pub const FILE_NAME: &str = "Cargo.toml";

const PACKAGE_VERSION: &[&str] = &["package", "version"];
const WORKSPACE_VERSION: &[&str] = &["workspace", "package", "version"];

/// `Cargo.toml` edited in place with `toml_edit`, so comments and layout survive
pub struct CargoManifest {
    path: PathBuf,
}

impl CargoManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CargoManifest { path: path.into() }
    }

    fn read_document(&self) -> Result<DocumentMut> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot read: {}", e)))?;
        content
            .parse::<DocumentMut>()
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot parse: {}", e)))
    }

    /// `[package].version`, or `[workspace.package].version` when the package inherits it
    fn version_key(&self, doc: &DocumentMut) -> Result<&'static [&'static str]> {
        [PACKAGE_VERSION, WORKSPACE_VERSION]
            .into_iter()
            .find(|key| lookup(doc, key).and_then(Item::as_str).is_some())
            .ok_or_else(|| {
                ReleaseError::manifest(
                    &self.path,
                    "no [package].version or [workspace.package].version string",
                )
            })
    }
}

fn lookup<'a>(doc: &'a DocumentMut, key: &[&str]) -> Option<&'a Item> {
    let mut item = doc.as_item();
    for part in key {
        item = item.get(*part)?;
    }
    Some(item)
}

fn lookup_mut<'a>(doc: &'a mut DocumentMut, key: &[&str]) -> Option<&'a mut Item> {
    let mut item = doc.as_item_mut();
    for part in key {
        item = item.get_mut(*part)?;
    }
    Some(item)
}

impl ProjectManifest for CargoManifest {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_version(&self) -> Result<Version> {
        let doc = self.read_document()?;
        let key = self.version_key(&doc)?;
        let text = lookup(&doc, key).and_then(Item::as_str).unwrap_or_default();
        parse_version(text)
            .map_err(|_| ReleaseError::manifest(&self.path, format!("invalid version \"{}\"", text)))
    }

    fn write_version(&self, version: &Version) -> Result<()> {
        let mut doc = self.read_document()?;
        let key = self.version_key(&doc)?;

        if let Some(value) = lookup_mut(&mut doc, key).and_then(Item::as_value_mut) {
            let decor = value.decor().clone();
            *value = Value::from(version.to_string());
            *value.decor_mut() = decor;
        }

        fs::write(&self.path, doc.to_string())
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot write: {}", e)))
    }
}
