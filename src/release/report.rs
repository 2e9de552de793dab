use semver::Version;

use crate::analyzer::CommitStatistics;
use crate::boundary::BoundaryNotice;
use crate::release::Snapshot;

/// Read-only summary produced by `check`
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub current_version: Version,
    /// Version the recommendation starts from
    pub base_version: Version,
    pub recommended_version: Version,
    /// Version the next write steps will use
    pub new_version: Version,
    /// Release tags reachable from HEAD, newest first
    pub release_tags: Vec<String>,
    pub commit_count: usize,
    pub commit_stat: CommitStatistics,
    pub already_released: bool,
}

impl CheckReport {
    pub fn from_snapshot(snapshot: &Snapshot<'_>) -> Self {
        let state = snapshot.state;
        CheckReport {
            current_version: state.version.clone(),
            base_version: state.base_version.clone(),
            recommended_version: state.recommended_version.clone(),
            new_version: snapshot.new_version.clone(),
            release_tags: state.releases.iter().map(|r| r.tag.clone()).collect(),
            commit_count: state.commits.len(),
            commit_stat: state.commit_stat,
            already_released: state.already_released,
        }
    }

    pub fn latest_tag(&self) -> Option<&str> {
        self.release_tags.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VersionUpdate {
    Updated { from: Version, to: Version },
    Unchanged(BoundaryNotice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChangelogUpdate {
    /// The fragment was prepended; `lines` is its line count
    Updated { lines: usize },
    Unchanged(BoundaryNotice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Tagged { tag: String, hash: String },
    Unchanged(BoundaryNotice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    NothingToDo(BoundaryNotice),
    Released {
        version: Version,
        version_update: VersionUpdate,
        changelog: ChangelogUpdate,
        commit: CommitOutcome,
    },
}
