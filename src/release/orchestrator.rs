use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, info};

use crate::analyzer::resolve_explicit;
use crate::boundary::BoundaryNotice;
use crate::changelog::{
    merge_changelog, ChangelogContext, ChangelogFormatter, ChangelogGenerator, TemplateFormatter,
};
use crate::config::Config;
use crate::domain::{TagPattern, VersionRequest};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::project::{self, ChangelogFile};
use crate::release::report::{
    ChangelogUpdate, CheckReport, CommitOutcome, ReleaseOutcome, VersionUpdate,
};
use crate::release::state::{ReleaseState, StateLoader};

/// A fresh state together with the version the write steps target
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: &'a ReleaseState,
    pub new_version: &'a Version,
}

/// Cached snapshot plus the chosen release version.
///
/// `new_version` survives forced refreshes: once chosen, only `set_version`
/// changes it.
#[derive(Default)]
struct StateCache {
    state: Option<ReleaseState>,
    new_version: Option<Version>,
}

impl StateCache {
    fn refresh<R: Repository>(&mut self, steps: &ReleaseSteps<R>, force: bool) -> Result<Snapshot<'_>> {
        info!("Refresh data...");
        let state = match self.state.take() {
            Some(state) if !force => {
                info!("Skipped, already fresh");
                state
            }
            _ => {
                let state = steps.loader.load(&steps.repo)?;
                info!("Refreshing complete");
                state
            }
        };

        let state: &ReleaseState = self.state.insert(state);
        let new_version = self
            .new_version
            .get_or_insert_with(|| state.recommended_version.clone());
        Ok(Snapshot { state, new_version })
    }
}

/// The write steps; they read state but never modify the cache
struct ReleaseSteps<R: Repository> {
    repo: R,
    loader: StateLoader,
    generator: ChangelogGenerator,
    tag_pattern: TagPattern,
    commit_message: String,
}

impl<R: Repository> ReleaseSteps<R> {
    fn update_manifest(&self, snapshot: &Snapshot<'_>) -> Result<VersionUpdate> {
        let manifest = project::open(snapshot.state.manifest_path.clone());
        let persisted = manifest.read_version()?;
        let target = snapshot.new_version;

        if persisted == *target {
            let notice = BoundaryNotice::VersionAlreadyPersisted {
                version: target.clone(),
                manifest: manifest.path().to_path_buf(),
            };
            info!("{}", notice);
            return Ok(VersionUpdate::Unchanged(notice));
        }

        info!(from = %persisted, to = %target, "Update package version");
        manifest.write_version(target)?;
        Ok(VersionUpdate::Updated {
            from: persisted,
            to: target.clone(),
        })
    }

    fn render_changelog(&self, snapshot: &Snapshot<'_>) -> Result<String> {
        let state = snapshot.state;
        let context = ChangelogContext::new(
            snapshot.new_version,
            self.tag_pattern.format(snapshot.new_version),
            state.release_date(),
        );
        debug!(version = %context.version, commits = state.commits.len(), "Render changelog");
        self.generator.generate(&context, &state.commits)
    }

    fn write_changelog(&self, snapshot: &Snapshot<'_>) -> Result<ChangelogUpdate> {
        let addition = self.render_changelog(snapshot)?;
        let file = ChangelogFile::new(&snapshot.state.changelog_path);

        // The file may have changed since the snapshot was taken
        let existing = file.read()?;
        match merge_changelog(&existing, &addition) {
            None => {
                let notice = BoundaryNotice::ChangelogAlreadyUpdated {
                    version: snapshot.new_version.clone(),
                };
                info!("{}", notice);
                Ok(ChangelogUpdate::Unchanged(notice))
            }
            Some(merged) => {
                let lines = addition.trim().lines().count();
                info!(lines, path = %file.path().display(), "Update changelog");
                file.write(&merged)?;
                Ok(ChangelogUpdate::Updated { lines })
            }
        }
    }

    fn commit_and_tag(&self, snapshot: &Snapshot<'_>) -> Result<CommitOutcome> {
        let state = snapshot.state;
        let tag = self.tag_pattern.format(snapshot.new_version);
        let head_hash = self.repo.head_hash()?;

        if let Some(tag_hash) = self.repo.resolve_tag_hash(&tag)? {
            if tag_hash != head_hash {
                return Err(ReleaseError::TagConflict {
                    tag,
                    tag_hash,
                    head_hash,
                });
            }
            let notice = BoundaryNotice::TagAlreadyAtHead { tag };
            info!("{}", notice);
            return Ok(CommitOutcome::Unchanged(notice));
        }

        let candidates: [&Path; 2] = [&state.manifest_path, &state.changelog_path];
        let files: Vec<&Path> = candidates.into_iter().filter(|p| p.exists()).collect();
        debug!(?files, "Add files to git index");
        self.repo.stage_files(&files)?;

        let message = self
            .commit_message
            .replace("{version}", &snapshot.new_version.to_string());
        debug!(%message, "Commit");
        let hash = self.repo.create_commit(&message)?;

        debug!(%tag, "Tag");
        self.repo.create_tag(&tag)?;
        info!(%tag, "Release commit tagged");

        Ok(CommitOutcome::Tagged { tag, hash })
    }
}

/// Sequences the release steps over a cached [ReleaseState].
///
/// Every operation refreshes first (a no-op while the cache is fresh), so steps
/// can be called alone or in any order.
pub struct ReleaseOrchestrator<R: Repository> {
    steps: ReleaseSteps<R>,
    cache: StateCache,
}

impl<R: Repository> ReleaseOrchestrator<R> {
    pub fn new(repo: R, working_dir: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let tag_pattern = TagPattern::new(config.release.tag_pattern.as_str())?;
        let loader = StateLoader::new(
            working_dir,
            config.project.manifest,
            config.project.changelog.as_str(),
            tag_pattern.clone(),
        );
        let generator =
            ChangelogGenerator::new(Box::new(TemplateFormatter::new(config.changelog.clone())));

        Ok(ReleaseOrchestrator {
            steps: ReleaseSteps {
                repo,
                loader,
                generator,
                tag_pattern,
                commit_message: config.release.commit_message.clone(),
            },
            cache: StateCache::default(),
        })
    }

    /// Replace the changelog formatter
    pub fn with_formatter(mut self, formatter: Box<dyn ChangelogFormatter>) -> Self {
        self.steps.generator = ChangelogGenerator::new(formatter);
        self
    }

    pub fn repository(&self) -> &R {
        &self.steps.repo
    }

    pub fn state(&self) -> Option<&ReleaseState> {
        self.cache.state.as_ref()
    }

    pub fn is_fresh(&self) -> bool {
        self.cache.state.is_some()
    }

    pub fn new_version(&self) -> Option<&Version> {
        self.cache.new_version.as_ref()
    }

    /// Load the release state unless a fresh one is cached and `force` is false
    pub fn refresh(&mut self, force: bool) -> Result<Snapshot<'_>> {
        self.cache.refresh(&self.steps, force)
    }

    pub fn check(&mut self) -> Result<CheckReport> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        Ok(CheckReport::from_snapshot(&snapshot))
    }

    /// Choose the release version; returns whether it moves past the last released one.
    ///
    /// Requests are resolved against [ReleaseState::base_version], so a version already
    /// written to the manifest by an earlier `update-version` can still be requested.
    /// The result never goes below the manifest version.
    pub fn set_version(&mut self, request: &str) -> Result<bool> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        let state = snapshot.state;
        let resolved = match request.parse::<VersionRequest>()? {
            VersionRequest::Auto => state.recommended_version.clone(),
            _ => resolve_explicit(&state.base_version, &state.commit_stat, request)?,
        };

        if resolved.cmp_precedence(&state.version).is_lt() {
            return Err(ReleaseError::VersionNotGreater {
                requested: resolved.to_string(),
                current: state.version.to_string(),
            });
        }
        info!(request, current = %state.version, new = %resolved, "Set version");

        let changed = resolved.cmp_precedence(&state.base_version).is_gt();
        self.cache.new_version = Some(resolved);
        Ok(changed)
    }

    pub fn update_pkg_version(&mut self) -> Result<VersionUpdate> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        self.steps.update_manifest(&snapshot)
    }

    /// Changelog fragment for the chosen version, without touching the file
    pub fn render_changelog(&mut self) -> Result<String> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        self.steps.render_changelog(&snapshot)
    }

    pub fn changelog(&mut self) -> Result<ChangelogUpdate> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        self.steps.write_changelog(&snapshot)
    }

    /// Stage the manifest and changelog, commit and tag the release
    pub fn commit(&mut self) -> Result<CommitOutcome> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        self.steps.commit_and_tag(&snapshot)
    }

    /// Run the whole release; no writes happen when there is nothing to release
    pub fn release(&mut self, request: &str) -> Result<ReleaseOutcome> {
        let snapshot = self.cache.refresh(&self.steps, false)?;
        let state = snapshot.state;
        if state.already_released {
            let notice = BoundaryNotice::AlreadyReleased {
                latest_tag: state.latest_release().map(|r| r.tag.clone()),
                current_commit_hash: state.head_hash.clone(),
            };
            info!("{}", notice);
            return Ok(ReleaseOutcome::NothingToDo(notice));
        }

        let current = state.version.clone();

        if !self.set_version(request)? {
            let notice = BoundaryNotice::VersionUnchanged { version: current };
            info!("{}", notice);
            return Ok(ReleaseOutcome::NothingToDo(notice));
        }

        let version = self.cache.refresh(&self.steps, false)?.new_version.clone();
        let version_update = self.update_pkg_version()?;
        let changelog = self.changelog()?;
        let commit = self.commit()?;

        Ok(ReleaseOutcome::Released {
            version,
            version_update,
            changelog,
            commit,
        })
    }
}
