//! Analysis engine for deciding the next version from commits

pub mod classifier;
pub mod decision;

pub use classifier::{classify, CommitStatistics};
pub use decision::{recommend, resolve_explicit};
