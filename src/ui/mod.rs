//! User-facing output.
//!
//! Diagnostics go through `tracing`; this module prints results and notices.

pub mod formatter;

pub use formatter::{
    display_changelog_update, display_check_report, display_commit_outcome, display_error,
    display_notice, display_release_outcome, display_status, display_success,
    display_version_update,
};
