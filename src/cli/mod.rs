//! Command line interface definition
//!
//! Parsing lives here; [orchestration] turns a parsed command into release steps.

pub mod orchestration;

use clap::{ArgAction, Parser, Subcommand};

use crate::cli::orchestration::ReleaseCommand;

#[derive(Debug, Parser)]
#[command(
    name = "semver-release",
    version,
    about = "Bump the version, update the changelog and tag a release from conventional commits"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every release step: version, changelog, commit and tag
    Release {
        /// `auto`, `major`, `minor`, `patch` or an exact version
        #[arg(default_value = "auto")]
        version: String,
    },

    /// Show the current version, unreleased commits and the recommended version
    Check,

    /// Write the release version into the project manifest
    #[command(alias = "ver")]
    UpdateVersion {
        version: Option<String>,

        #[arg(short, long, help = "Print the version without writing it")]
        print_only: bool,
    },

    /// Prepend the release notes to the changelog
    Changelog {
        version: Option<String>,

        #[arg(short, long, help = "Print the release notes without writing them")]
        print_only: bool,
    },

    /// Commit the manifest and changelog, then tag the release
    Commit { version: Option<String> },
}

impl From<Command> for ReleaseCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Release { version } => ReleaseCommand::Release { version },
            Command::Check => ReleaseCommand::Check,
            Command::UpdateVersion {
                version,
                print_only,
            } => ReleaseCommand::UpdateVersion {
                version,
                print_only,
            },
            Command::Changelog {
                version,
                print_only,
            } => ReleaseCommand::Changelog {
                version,
                print_only,
            },
            Command::Commit { version } => ReleaseCommand::Commit { version },
        }
    }
}
