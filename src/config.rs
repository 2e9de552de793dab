use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::project::ManifestKind;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "semver-release.toml";

/// Represents the complete configuration for semver-release.
///
/// Contains tag and commit naming, project file locations, and the changelog template.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "chore(release): {version}".to_string()
}

/// How release tags and release commits are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

/// Which project files carry the version and the changelog.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub manifest: ManifestKind,

    /// Changelog path, relative to the project root
    #[serde(default = "default_changelog_file")]
    pub changelog: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            manifest: ManifestKind::default(),
            changelog: default_changelog_file(),
        }
    }
}

/// One changelog section and the commit type it collects.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionConfig {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub title: String,
}

impl SectionConfig {
    fn new(commit_type: &str, title: &str) -> Self {
        SectionConfig {
            commit_type: commit_type.to_string(),
            title: title.to_string(),
        }
    }
}

fn default_header() -> String {
    "## {version} ({date})".to_string()
}

fn default_commit_format() -> String {
    "* {scope}{subject} ({hash})".to_string()
}

fn default_breaking_title() -> String {
    "BREAKING CHANGES".to_string()
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("feat", "Features"),
        SectionConfig::new("fix", "Bug Fixes"),
        SectionConfig::new("perf", "Performance Improvements"),
        SectionConfig::new("revert", "Reverts"),
    ]
}

/// Template used to render a changelog fragment.
///
/// `header` accepts `{version}`, `{tag}` and `{date}`; `commit_format` accepts
/// `{scope}`, `{subject}`, `{hash}` and `{full_hash}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_commit_format")]
    pub commit_format: String,

    #[serde(default = "default_breaking_title")]
    pub breaking_title: String,

    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            header: default_header(),
            commit_format: default_commit_format(),
            breaking_title: default_breaking_title(),
            sections: default_sections(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-release.toml` in current directory
/// 3. `.semver-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return read_config(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            return read_config(&user_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("Cannot parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.release.tag_pattern, "v{version}");
        assert_eq!(config.release.commit_message, "chore(release): {version}");
        assert_eq!(config.project.manifest, ManifestKind::Auto);
        assert_eq!(config.project.changelog, "CHANGELOG.md");
        assert_eq!(config.changelog.sections[0].commit_type, "feat");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[release]
tag_pattern = "release-{version}"

[project]
manifest = "npm"
"#,
        )
        .unwrap();
        assert_eq!(config.release.tag_pattern, "release-{version}");
        assert_eq!(config.release.commit_message, "chore(release): {version}");
        assert_eq!(config.project.manifest, ManifestKind::Npm);
        assert_eq!(config.changelog, ChangelogConfig::default());
    }

    #[test]
    fn test_missing_custom_path_is_an_error() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
