//! Domain logic - pure release rules independent of git and the filesystem

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{CommitNote, CommitRecord};
pub use tag::{Release, TagPattern};
pub use version::{VersionBump, VersionRequest};
