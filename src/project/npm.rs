use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use serde_json::Value;

use crate::domain::version::parse_version;
use crate::error::{ReleaseError, Result};
use crate::project::ProjectManifest;

pub const FILE_NAME: &str = "package.json";

/// `package.json`; keys keep their order and the file is re-printed with two-space indentation
pub struct PackageJson {
    path: PathBuf,
}

impl PackageJson {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PackageJson { path: path.into() }
    }

    fn read_json(&self) -> Result<(String, Value)> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot read: {}", e)))?;
        let json = serde_json::from_str(&content)
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot parse: {}", e)))?;
        Ok((content, json))
    }
}

impl ProjectManifest for PackageJson {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_version(&self) -> Result<Version> {
        let (_, json) = self.read_json()?;
        let text = json
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ReleaseError::manifest(&self.path, "no \"version\" string"))?;
        parse_version(text)
            .map_err(|_| ReleaseError::manifest(&self.path, format!("invalid version \"{}\"", text)))
    }

    fn write_version(&self, version: &Version) -> Result<()> {
        let (content, mut json) = self.read_json()?;
        let object = json
            .as_object_mut()
            .ok_or_else(|| ReleaseError::manifest(&self.path, "top level is not an object"))?;
        object.insert("version".to_string(), Value::String(version.to_string()));

        let mut output = serde_json::to_string_pretty(&json)
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot serialize: {}", e)))?;
        if content.ends_with('\n') {
            output.push('\n');
        }

        fs::write(&self.path, output)
            .map_err(|e| ReleaseError::manifest(&self.path, format!("cannot write: {}", e)))
    }
}
