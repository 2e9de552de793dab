use std::cmp::Ordering;

use semver::Version;

use crate::analyzer::CommitStatistics;
use crate::domain::{VersionBump, VersionRequest};
use crate::error::{ReleaseError, Result};

/// Bump kind warranted by the statistics, highest priority first
pub fn recommended_bump(stats: &CommitStatistics) -> Option<VersionBump> {
    if stats.breaking_changes > 0 {
        Some(VersionBump::Major)
    } else if stats.features > 0 {
        Some(VersionBump::Minor)
    } else if stats.fixes > 0 {
        Some(VersionBump::Patch)
    } else {
        None
    }
}

/// Next version recommended by the commit statistics.
///
/// Returns `current` unchanged when no commit warrants a release.
pub fn recommend(current: &Version, stats: &CommitStatistics) -> Version {
    match recommended_bump(stats) {
        Some(bump) => bump.apply(current),
        None => current.clone(),
    }
}

/// Resolve a caller's version request (`auto`, `major`, `minor`, `patch` or a literal)
pub fn resolve_explicit(
    current: &Version,
    stats: &CommitStatistics,
    requested: &str,
) -> Result<Version> {
    match requested.parse::<VersionRequest>()? {
        VersionRequest::Auto => Ok(recommend(current, stats)),
        VersionRequest::Bump(bump) => Ok(bump.apply(current)),
        VersionRequest::Exact(version) if version.cmp_precedence(current) == Ordering::Greater => {
            Ok(version)
        }
        VersionRequest::Exact(version) => Err(ReleaseError::VersionNotGreater {
            requested: version.to_string(),
            current: current.to_string(),
        }),
    }
}
