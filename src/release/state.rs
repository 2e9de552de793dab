use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};
use semver::Version;
use tracing::{debug, info};

use crate::analyzer::{classify, recommend, CommitStatistics};
use crate::domain::{CommitRecord, Release, TagPattern};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::project::{self, ChangelogFile, ManifestKind};

/// Everything a release decision is based on, read in one refresh.
///
/// A snapshot is never updated piecemeal; the derived fields always belong to
/// the `commits` and `version` stored next to them.
#[derive(Debug, Clone)]
pub struct ReleaseState {
    pub project_root: PathBuf,
    pub manifest_path: PathBuf,
    pub changelog_path: PathBuf,
    /// Version currently recorded in the manifest
    pub version: Version,
    /// Version the next release is computed from: the newest release when the
    /// manifest is already ahead of it, the manifest version otherwise
    pub base_version: Version,
    /// Release tags reachable from HEAD, newest first
    pub releases: Vec<Release>,
    pub head_hash: String,
    /// Commits after the newest release, oldest first
    pub commits: Vec<CommitRecord>,
    pub commit_stat: CommitStatistics,
    pub recommended_version: Version,
    pub already_released: bool,
    pub current_changelog: String,
}

impl ReleaseState {
    pub fn latest_release(&self) -> Option<&Release> {
        self.releases.first()
    }

    /// Whether the manifest carries a version that has not been tagged yet,
    /// left behind by a release that stopped after updating the manifest
    pub fn has_pending_version(&self) -> bool {
        self.base_version != self.version
    }

    /// Date of the newest unreleased commit, today when there is none
    pub fn release_date(&self) -> NaiveDate {
        self.commits
            .last()
            .map(|c| c.committed_at.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Marks a refresh as running; released on drop, including on early error returns
pub struct RefreshGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Reads a [ReleaseState] from the project files and the repository
pub struct StateLoader {
    working_dir: PathBuf,
    manifest_kind: ManifestKind,
    changelog_file: PathBuf,
    tag_pattern: TagPattern,
    refreshing: AtomicBool,
}

impl StateLoader {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        manifest_kind: ManifestKind,
        changelog_file: impl Into<PathBuf>,
        tag_pattern: TagPattern,
    ) -> Self {
        StateLoader {
            working_dir: working_dir.into(),
            manifest_kind,
            changelog_file: changelog_file.into(),
            tag_pattern,
            refreshing: AtomicBool::new(false),
        }
    }

    /// Claim the refresh slot; fails if a refresh is already running
    pub fn begin_refresh(&self) -> Result<RefreshGuard<'_>> {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ReleaseError::ConcurrentRefresh)?;
        Ok(RefreshGuard {
            flag: &self.refreshing,
        })
    }

    /// Build a fresh snapshot
    pub fn load<R: Repository>(&self, repo: &R) -> Result<ReleaseState> {
        let _guard = self.begin_refresh()?;

        let manifest = project::discover(&self.working_dir, self.manifest_kind)?;
        let project_root = manifest.root().to_path_buf();
        if !same_dir(&project_root, &self.working_dir) {
            return Err(ReleaseError::NotAtProjectRoot {
                cwd: self.working_dir.clone(),
                root: project_root,
            });
        }

        let version = manifest.read_version()?;
        debug!(%version, manifest = %manifest.path().display(), "Read current version");

        let releases = self.load_releases(repo)?;
        let head_hash = repo.head_hash()?;

        let from = releases.first().map(|r| r.tag.as_str());
        let mut commits = repo.load_commits(from, "HEAD")?;
        commits.sort_by_key(|c| c.committed_at);
        info!(
            count = commits.len(),
            since = from.unwrap_or("the first commit"),
            "Loaded commits"
        );

        let pending = releases
            .first()
            .filter(|latest| version.cmp_precedence(&latest.version).is_gt());
        let base_version = match pending {
            Some(latest) => {
                info!(
                    %version,
                    latest = %latest.tag,
                    "Manifest version is ahead of the latest release"
                );
                latest.version.clone()
            }
            None => version.clone(),
        };

        let commit_stat = classify(&commits);
        let mut recommended_version = recommend(&base_version, &commit_stat);
        if pending.is_some() && recommended_version.cmp_precedence(&version).is_lt() {
            recommended_version = version.clone();
        }
        debug!(?commit_stat, %base_version, %recommended_version, "Analyzed commits");

        let already_released = commits.is_empty();

        debug!("Read current changelog");
        let changelog_path = project_root.join(&self.changelog_file);
        let current_changelog = ChangelogFile::new(&changelog_path).read()?;

        Ok(ReleaseState {
            manifest_path: manifest.path().to_path_buf(),
            project_root,
            changelog_path,
            version,
            base_version,
            releases,
            head_hash,
            commits,
            commit_stat,
            recommended_version,
            already_released,
            current_changelog,
        })
    }

    fn load_releases<R: Repository>(&self, repo: &R) -> Result<Vec<Release>> {
        let mut releases: Vec<Release> = repo
            .list_tags(Some("HEAD"))?
            .iter()
            .filter_map(|tag| {
                let release = self.tag_pattern.parse_release(tag);
                if release.is_none() {
                    debug!(tag = %tag, pattern = self.tag_pattern.as_str(), "Ignoring non-release tag");
                }
                release
            })
            .collect();

        releases.sort_by(|a, b| b.version.cmp_precedence(&a.version));
        Ok(releases)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
