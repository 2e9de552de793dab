//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations a release needs, allowing the release engine to run against a
//! real repository or an in-memory one in tests.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A linear in-memory history for testing
//!
//! Code should depend on the [Repository] trait rather than a concrete
//! implementation.
//!
//! ```rust
//! # use semver_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> semver_release::Result<()> {
//! let head = repo.head_hash()?;
//! let commits = repo.load_commits(Some("v1.0.0"), "HEAD")?;
//! println!("{} commits up to {}", commits.len(), head);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Version-control operations used by the release engine
///
/// ## Error Handling
///
/// Implementations map underlying failures to [crate::error::ReleaseError];
/// `git2::Error`s surface as [crate::error::ReleaseError::Git].
pub trait Repository {
    /// Tag names, trimmed and without empty entries
    ///
    /// With `merged_into` set (e.g. `"HEAD"`), only tags whose commit is reachable
    /// from that revision are returned.
    fn list_tags(&self, merged_into: Option<&str>) -> Result<Vec<String>>;

    /// Full hash of the commit HEAD points at
    fn head_hash(&self) -> Result<String>;

    /// Full hash of the commit a tag points at, or `None` if the tag does not exist
    fn resolve_tag_hash(&self, tag: &str) -> Result<Option<String>>;

    /// Commits in the range `from_exclusive..to_inclusive`, oldest first
    ///
    /// `None` as lower bound means the whole history up to `to_inclusive`.
    fn load_commits(
        &self,
        from_exclusive: Option<&str>,
        to_inclusive: &str,
    ) -> Result<Vec<CommitRecord>>;

    /// Add files (absolute paths inside the work tree) to the index
    fn stage_files(&self, paths: &[&Path]) -> Result<()>;

    /// Commit the index on top of HEAD, returning the new commit hash
    fn create_commit(&self, message: &str) -> Result<String>;

    /// Create a lightweight tag at HEAD; fails if the tag already exists
    fn create_tag(&self, name: &str) -> Result<()>;
}
