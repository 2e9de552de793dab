use std::process;

use anyhow::Result;
use clap::Parser;

use semver_release::cli::orchestration::{run_workflow, CommandOutcome, WorkflowArgs};
use semver_release::cli::Cli;
use semver_release::ui;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v; logs go to stderr so stdout stays clean for -p output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let args = WorkflowArgs {
        config_path: cli.config,
        working_dir: std::env::current_dir()?,
        command: cli.command.into(),
    };

    match run_workflow(args)? {
        CommandOutcome::Checked(report) => ui::display_check_report(&report),
        CommandOutcome::VersionPreview(version) => println!("{}", version),
        CommandOutcome::VersionUpdated(update) => ui::display_version_update(&update),
        CommandOutcome::ChangelogPreview(text) => print!("{}", text),
        CommandOutcome::ChangelogUpdated(update) => ui::display_changelog_update(&update),
        CommandOutcome::Committed(outcome) => ui::display_commit_outcome(&outcome),
        CommandOutcome::Released(outcome) => ui::display_release_outcome(&outcome),
    }

    Ok(())
}
