use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use git2::{Commit, ErrorCode, Oid, Repository as Git2Repo, Sort};
use tracing::trace;

use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        Ok(self.repo.revparse_single(revision)?.peel_to_commit()?.id())
    }

    fn tag_commit(&self, tag_name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut map: HashMap<Oid, Vec<String>> = HashMap::new();
        for name in self.repo.tag_names(None)?.iter().flatten() {
            if let Some(oid) = self.tag_commit(name)? {
                map.entry(oid).or_default().push(name.to_string());
            }
        }
        Ok(map)
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Repository for Git2Repository {
    fn list_tags(&self, merged_into: Option<&str>) -> Result<Vec<String>> {
        let target = merged_into.map(|rev| self.resolve_commit(rev)).transpose()?;
        let mut tags = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            if let Some(target) = target {
                let Some(tag_oid) = self.tag_commit(name)? else {
                    continue;
                };
                if tag_oid != target && !self.repo.graph_descendant_of(target, tag_oid)? {
                    trace!(tag = name, "not merged, skipping");
                    continue;
                }
            }

            tags.push(name.to_string());
        }

        Ok(tags)
    }

    fn head_hash(&self) -> Result<String> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    fn resolve_tag_hash(&self, tag: &str) -> Result<Option<String>> {
        Ok(self.tag_commit(tag)?.map(|oid| oid.to_string()))
    }

    fn load_commits(
        &self,
        from_exclusive: Option<&str>,
        to_inclusive: &str,
    ) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push(self.resolve_commit(to_inclusive)?)?;
        if let Some(from) = from_exclusive {
            revwalk.hide(self.resolve_commit(from)?)?;
        }

        let mut tags = self.tags_by_commit()?;
        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes());
            let committed_at =
                DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();

            commits.push(CommitRecord::from_message(
                &message,
                oid.to_string(),
                tags.remove(&oid).unwrap_or_default(),
                committed_at,
            ));
        }

        Ok(commits)
    }

    fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("repository has no working directory"))?;
        let workdir = workdir.canonicalize().map_err(|e| {
            git2::Error::from_str(&format!(
                "cannot resolve working directory {}: {}",
                workdir.display(),
                e
            ))
        })?;
        let mut index = self.repo.index()?;

        for path in paths {
            let absolute = path.canonicalize().map_err(|e| {
                git2::Error::from_str(&format!("cannot stage {}: {}", path.display(), e))
            })?;
            let relative = absolute.strip_prefix(&workdir).map_err(|_| {
                git2::Error::from_str(&format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    workdir.display()
                ))
            })?;
            index.add_path(relative)?;
        }

        index.write()?;
        Ok(())
    }

    fn create_commit(&self, message: &str) -> Result<String> {
        let signature = self.repo.signature()?;
        let tree_id = self.repo.index()?.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| {
                ReleaseError::Git(git2::Error::from_str(&format!(
                    "cannot create tag {}: {}",
                    name,
                    e.message()
                )))
            })?;
        Ok(())
    }
}
