//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text, `display_*` functions print it.

use console::style;

use crate::analyzer::CommitStatistics;
use crate::boundary::BoundaryNotice;
use crate::release::{ChangelogUpdate, CheckReport, CommitOutcome, ReleaseOutcome, VersionUpdate};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a "nothing to do" notice.
pub fn display_notice(notice: &BoundaryNotice) {
    println!("{} {}", style("ℹ").cyan(), notice);
}

pub fn format_statistics(stats: &CommitStatistics) -> String {
    format!(
        "{} breaking, {} features, {} fixes, {} chores, {} other",
        stats.breaking_changes, stats.features, stats.fixes, stats.chores, stats.other
    )
}

/// Multi-line summary of a check report, without styling
pub fn format_check_report(report: &CheckReport) -> String {
    let mut lines = vec![
        format!("Current version:     {}", report.current_version),
        format!(
            "Latest release:      {}",
            report.latest_tag().unwrap_or("none")
        ),
        format!("Unreleased commits:  {}", report.commit_count),
        format!("Commit statistics:   {}", format_statistics(&report.commit_stat)),
        format!("Recommended version: {}", report.recommended_version),
    ];

    if report.base_version != report.current_version {
        lines.push(format!(
            "Pending version:     {} (in the manifest, not tagged yet)",
            report.current_version
        ));
    }

    if report.new_version != report.recommended_version {
        lines.push(format!("Selected version:    {}", report.new_version));
    }

    if report.release_tags.len() > 1 {
        lines.push(format!("Release tags:        {}", report.release_tags.join(", ")));
    }

    lines.join("\n")
}

pub fn display_check_report(report: &CheckReport) {
    println!("\n{}", style("Release check").bold());
    println!("{}", format_check_report(report));

    if report.already_released {
        println!("\n{} Already released", style("ℹ").cyan());
    } else if report.recommended_version == report.base_version {
        println!("\n{} No release needed", style("ℹ").cyan());
    } else {
        println!();
        display_status(&format!("Ready to release {}", style(&report.new_version).bold()));
    }
}

pub fn display_version_update(update: &VersionUpdate) {
    match update {
        VersionUpdate::Updated { from, to } => {
            display_success(&format!("Updated package version {} → {}", from, to))
        }
        VersionUpdate::Unchanged(notice) => display_notice(notice),
    }
}

pub fn display_changelog_update(update: &ChangelogUpdate) {
    match update {
        ChangelogUpdate::Updated { lines } => {
            display_success(&format!("Updated changelog ({} lines added)", lines))
        }
        ChangelogUpdate::Unchanged(notice) => display_notice(notice),
    }
}

pub fn display_commit_outcome(outcome: &CommitOutcome) {
    match outcome {
        CommitOutcome::Tagged { tag, hash } => {
            let short_hash = hash.get(..7).unwrap_or(hash);
            display_success(&format!("Committed {} and created tag {}", short_hash, tag))
        }
        CommitOutcome::Unchanged(notice) => display_notice(notice),
    }
}

pub fn display_release_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::NothingToDo(notice) => display_notice(notice),
        ReleaseOutcome::Released {
            version,
            version_update,
            changelog,
            commit,
        } => {
            display_version_update(version_update);
            display_changelog_update(changelog);
            display_commit_outcome(commit);
            println!(
                "\n{} Released {}\n",
                style("✓").green().bold(),
                style(version).bold()
            );
        }
    }
}
