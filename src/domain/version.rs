use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{ReleaseError, Result};

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Bump version according to bump type
    ///
    /// Lower components reset to zero and build metadata is dropped. A pre-release
    /// of exactly the release being bumped to is promoted instead of skipped, so
    /// `1.3.0-rc.1` bumped by `Minor` gives `1.3.0`.
    pub fn apply(&self, version: &Version) -> Version {
        let pre_release = !version.pre.is_empty();
        let (major, minor, patch) = match self {
            VersionBump::Major if pre_release && version.minor == 0 && version.patch == 0 => {
                (version.major, 0, 0)
            }
            VersionBump::Major => (version.major + 1, 0, 0),
            VersionBump::Minor if pre_release && version.patch == 0 => {
                (version.major, version.minor, 0)
            }
            VersionBump::Minor => (version.major, version.minor + 1, 0),
            VersionBump::Patch if pre_release => (version.major, version.minor, version.patch),
            VersionBump::Patch => (version.major, version.minor, version.patch + 1),
        };

        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// What the caller asked the next version to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    /// Follow the recommendation derived from the commit history
    Auto,
    /// Increment one component of the current version
    Bump(VersionBump),
    /// Release exactly this version
    Exact(Version),
}

impl FromStr for VersionRequest {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "auto" => Ok(VersionRequest::Auto),
            "major" => Ok(VersionRequest::Bump(VersionBump::Major)),
            "minor" => Ok(VersionRequest::Bump(VersionBump::Minor)),
            "patch" => Ok(VersionRequest::Bump(VersionBump::Patch)),
            other => parse_version(other).map(VersionRequest::Exact),
        }
    }
}

/// Parse a semantic version, accepting a single leading `v`
pub fn parse_version(text: &str) -> Result<Version> {
    let trimmed = text.trim();
    let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(clean).map_err(|_| ReleaseError::InvalidVersion(text.to_string()))
}
