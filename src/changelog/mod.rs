//! Changelog generation
//!
//! Rendering is delegated to a [`ChangelogFormatter`]; [`TemplateFormatter`] is the
//! built-in one, driven by the `[changelog]` section of the configuration. The
//! generator never reorders commits, callers hand them over oldest first.

pub mod template;

pub use template::TemplateFormatter;

use chrono::NaiveDate;
use semver::Version;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Values a formatter may reference besides the commits themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogContext {
    /// Version label of the release being described
    pub version: String,
    /// Tag the release will carry
    pub tag: String,
    pub date: NaiveDate,
}

impl ChangelogContext {
    pub fn new(version: &Version, tag: impl Into<String>, date: NaiveDate) -> Self {
        ChangelogContext {
            version: version.to_string(),
            tag: tag.into(),
            date,
        }
    }
}

/// Turns an ordered commit sequence into changelog markup
pub trait ChangelogFormatter {
    fn render(&self, context: &ChangelogContext, commits: &[CommitRecord]) -> Result<String>;
}

/// Produces the changelog fragment for one release
pub struct ChangelogGenerator {
    formatter: Box<dyn ChangelogFormatter>,
}

impl ChangelogGenerator {
    pub fn new(formatter: Box<dyn ChangelogFormatter>) -> Self {
        ChangelogGenerator { formatter }
    }

    /// Render the fragment for `context.version`; same input, same text
    pub fn generate(&self, context: &ChangelogContext, commits: &[CommitRecord]) -> Result<String> {
        self.formatter.render(context, commits)
    }
}

/// Prepend `addition` to `existing` unless `existing` already starts with it.
///
/// Returns `None` when the changelog is already up to date. Leading and trailing
/// whitespace is ignored for the comparison.
pub fn merge_changelog(existing: &str, addition: &str) -> Option<String> {
    let addition = addition.trim();
    if existing.trim().starts_with(addition) {
        return None;
    }

    let rest = existing.trim_start();
    if rest.is_empty() {
        Some(format!("{}\n", addition))
    } else {
        Some(format!("{}\n\n{}", addition, rest))
    }
}
