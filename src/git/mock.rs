use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::domain::CommitRecord;
use crate::error::Result;
use crate::git::Repository;

#[derive(Default)]
struct MockState {
    /// Linear history, oldest first
    commits: Vec<CommitRecord>,
    messages: Vec<String>,
    tags: BTreeMap<String, String>,
    staged: Vec<PathBuf>,
    created_tags: Vec<String>,
}

/// Mock repository with a linear history, for testing without actual git operations
#[derive(Default)]
pub struct MockRepository {
    state: RefCell<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of HEAD and return its hash
    pub fn add_commit(&mut self, message: &str) -> String {
        self.state.get_mut().push_commit(message)
    }

    /// Add a tag pointing at a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.state.get_mut().tags.insert(name.into(), hash.into());
    }

    /// Tag the current HEAD
    pub fn tag_head(&mut self, name: impl Into<String>) {
        let state = self.state.get_mut();
        if let Some(head) = state.commits.last().map(|c| c.hash.clone()) {
            state.tags.insert(name.into(), head);
        }
    }

    /// Tags created through [Repository::create_tag]
    pub fn created_tags(&self) -> Vec<String> {
        self.state.borrow().created_tags.clone()
    }

    /// Paths passed to [Repository::stage_files], in call order
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.state.borrow().staged.clone()
    }

    /// Subjects of the whole history, oldest first
    pub fn subjects(&self) -> Vec<String> {
        self.state
            .borrow()
            .commits
            .iter()
            .map(|c| c.subject.clone())
            .collect()
    }

    /// Raw message of the HEAD commit
    pub fn last_message(&self) -> Option<String> {
        self.state.borrow().messages.last().cloned()
    }
}

impl MockState {
    fn push_commit(&mut self, message: &str) -> String {
        let index = self.commits.len();
        let hash = format!("{:040x}", index + 1);
        let committed_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default()
            + Duration::minutes(index as i64);
        self.commits.push(CommitRecord::from_message(
            message,
            hash.clone(),
            Vec::new(),
            committed_at,
        ));
        self.messages.push(message.to_string());
        hash
    }

    fn resolve(&self, revision: &str) -> Result<usize> {
        let hash = match revision {
            "HEAD" => self.commits.last().map(|c| c.hash.clone()),
            other => self.tags.get(other).cloned().or_else(|| Some(other.to_string())),
        };
        hash.and_then(|h| self.commits.iter().position(|c| c.hash == h))
            .ok_or_else(|| git2::Error::from_str(&format!("revspec '{}' not found", revision)).into())
    }
}

impl Repository for MockRepository {
    fn list_tags(&self, merged_into: Option<&str>) -> Result<Vec<String>> {
        let state = self.state.borrow();
        let limit = merged_into.map(|rev| state.resolve(rev)).transpose()?;
        Ok(state
            .tags
            .iter()
            .filter(|(_, hash)| match limit {
                Some(limit) => state.commits[..=limit].iter().any(|c| &c.hash == *hash),
                None => true,
            })
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn head_hash(&self) -> Result<String> {
        let state = self.state.borrow();
        let index = state.resolve("HEAD")?;
        Ok(state.commits[index].hash.clone())
    }

    fn resolve_tag_hash(&self, tag: &str) -> Result<Option<String>> {
        Ok(self.state.borrow().tags.get(tag).cloned())
    }

    fn load_commits(
        &self,
        from_exclusive: Option<&str>,
        to_inclusive: &str,
    ) -> Result<Vec<CommitRecord>> {
        let state = self.state.borrow();
        let end = state.resolve(to_inclusive)?;
        let start = match from_exclusive {
            Some(from) => state.resolve(from)? + 1,
            None => 0,
        };

        Ok(state
            .commits
            .get(start..=end)
            .unwrap_or_default()
            .iter()
            .map(|commit| {
                let mut commit = commit.clone();
                commit.associated_tags = state
                    .tags
                    .iter()
                    .filter(|(_, hash)| **hash == commit.hash)
                    .map(|(name, _)| name.clone())
                    .collect();
                commit
            })
            .collect())
    }

    fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        self.state
            .borrow_mut()
            .staged
            .extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }

    fn create_commit(&self, message: &str) -> Result<String> {
        Ok(self.state.borrow_mut().push_commit(message))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.tags.contains_key(name) {
            return Err(git2::Error::from_str(&format!("tag '{}' already exists", name)).into());
        }
        let head = state.resolve("HEAD")?;
        let hash = state.commits[head].hash.clone();
        state.tags.insert(name.to_string(), hash);
        state.created_tags.push(name.to_string());
        Ok(())
    }
}
