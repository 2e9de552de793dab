//! Command dispatch
//!
//! Decoupled from clap so a command can run against any [Repository],
//! the mock included.

use std::path::PathBuf;

use anyhow::{Context, Result};
use semver::Version;
use tracing::debug;

use crate::config::load_config;
use crate::git::{Git2Repository, Repository};
use crate::release::{
    ChangelogUpdate, CheckReport, CommitOutcome, ReleaseOrchestrator, ReleaseOutcome,
    VersionUpdate,
};

/// A release command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseCommand {
    Release { version: String },
    Check,
    UpdateVersion { version: Option<String>, print_only: bool },
    Changelog { version: Option<String>, print_only: bool },
    Commit { version: Option<String> },
}

/// Arguments for a workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Project root; the git repository is discovered from here
    pub working_dir: PathBuf,

    pub command: ReleaseCommand,
}

/// What a command produced, for the caller to display
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Checked(CheckReport),
    VersionPreview(Version),
    VersionUpdated(VersionUpdate),
    ChangelogPreview(String),
    ChangelogUpdated(ChangelogUpdate),
    Committed(CommitOutcome),
    Released(ReleaseOutcome),
}

/// Load configuration, open the repository and run the command
pub fn run_workflow(args: WorkflowArgs) -> Result<CommandOutcome> {
    let config = load_config(args.config_path.as_deref()).context("Failed to load configuration")?;
    let repo = Git2Repository::open(&args.working_dir).with_context(|| {
        format!(
            "Failed to open git repository at {}",
            args.working_dir.display()
        )
    })?;

    let orchestrator = ReleaseOrchestrator::new(repo, &args.working_dir, &config)?;
    execute(orchestrator, args.command)
}

/// Run one command on an orchestrator
pub fn execute<R: Repository>(
    mut orchestrator: ReleaseOrchestrator<R>,
    command: ReleaseCommand,
) -> Result<CommandOutcome> {
    debug!(?command, "Execute");

    let outcome = match command {
        ReleaseCommand::Release { version } => {
            CommandOutcome::Released(orchestrator.release(&version)?)
        }
        ReleaseCommand::Check => CommandOutcome::Checked(orchestrator.check()?),
        ReleaseCommand::UpdateVersion {
            version,
            print_only,
        } => {
            select_version(&mut orchestrator, version.as_deref())?;
            if print_only {
                let version = orchestrator.refresh(false)?.new_version.clone();
                CommandOutcome::VersionPreview(version)
            } else {
                CommandOutcome::VersionUpdated(orchestrator.update_pkg_version()?)
            }
        }
        ReleaseCommand::Changelog {
            version,
            print_only,
        } => {
            select_version(&mut orchestrator, version.as_deref())?;
            if print_only {
                CommandOutcome::ChangelogPreview(orchestrator.render_changelog()?)
            } else {
                CommandOutcome::ChangelogUpdated(orchestrator.changelog()?)
            }
        }
        ReleaseCommand::Commit { version } => {
            select_version(&mut orchestrator, version.as_deref())?;
            CommandOutcome::Committed(orchestrator.commit()?)
        }
    };

    Ok(outcome)
}

fn select_version<R: Repository>(
    orchestrator: &mut ReleaseOrchestrator<R>,
    version: Option<&str>,
) -> Result<()> {
    if let Some(version) = version {
        orchestrator
            .set_version(version)
            .with_context(|| format!("Cannot release version '{}'", version))?;
    }
    Ok(())
}
