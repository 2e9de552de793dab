use regex::Regex;
use semver::Version;

use crate::domain::version::parse_version;
use crate::error::{ReleaseError, Result};

/// A release tag together with the version it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub version: Version,
}

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
    matcher: Regex,
}

impl TagPattern {
    /// Create a new tag pattern; it must contain the `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("{version}") {
            return Err(ReleaseError::config(format!(
                "Tag pattern '{}' must contain the {{version}} placeholder",
                pattern
            )));
        }

        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", r"(?P<version>\S+)");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| ReleaseError::config(format!("Invalid tag pattern '{}': {}", pattern, e)))?;

        Ok(TagPattern { pattern, matcher })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Extract the version a release tag names, if the tag follows this pattern
    pub fn parse_release(&self, tag: &str) -> Option<Release> {
        let captures = self.matcher.captures(tag)?;
        let version = parse_version(captures.name("version")?.as_str()).ok()?;
        Some(Release {
            tag: tag.to_string(),
            version,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "release-1.2.3");
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(matches!(
            TagPattern::new("latest"),
            Err(ReleaseError::Config(_))
        ));
    }

    #[test]
    fn test_parse_release() {
        let pattern = TagPattern::new("v{version}").unwrap();
        let release = pattern.parse_release("v2.0.0-rc.1").unwrap();
        assert_eq!(release.tag, "v2.0.0-rc.1");
        assert_eq!(release.version, Version::parse("2.0.0-rc.1").unwrap());
    }

    #[test]
    fn test_parse_release_rejects_other_tags() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert!(pattern.parse_release("release-1.2.3").is_none());
        assert!(pattern.parse_release("vnext").is_none());
        assert!(pattern.parse_release("v1.2").is_none());
    }
}
