//! Release state and the orchestrator sequencing a release
//!
//! The orchestrator refreshes a [ReleaseState] snapshot on demand and drives the
//! steps check → set version → update manifest → changelog → commit and tag.
//! Every write step checks the repository or file content first, so running a
//! step or the whole release again is safe.

pub mod orchestrator;
pub mod report;
pub mod state;

pub use orchestrator::{ReleaseOrchestrator, Snapshot};
pub use report::{ChangelogUpdate, CheckReport, CommitOutcome, ReleaseOutcome, VersionUpdate};
pub use state::{RefreshGuard, ReleaseState, StateLoader};
