// tests/integration_test.rs
use std::fs;
use std::path::{Path, PathBuf};

use git2::{Commit, Oid, Repository as Git2Repo};
use semver::Version;
use semver_release::boundary::BoundaryNotice;
use semver_release::cli::orchestration::{run_workflow, CommandOutcome, ReleaseCommand, WorkflowArgs};
use semver_release::release::{CommitOutcome, ReleaseOutcome};
use tempfile::TempDir;

const CARGO_TOML: &str = "[package]\nname = \"demo\" # crate name\nversion = \"1.0.0\"\nedition = \"2021\"\n\n[dependencies]\n";

fn commit_file(repo: &Git2Repo, dir: &Path, name: &str, content: &str, message: &str) -> Oid {
    fs::write(dir.join(name), content).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = repo.signature().unwrap();
    let parent = repo.head().ok().map(|h| h.peel_to_commit().unwrap());
    let parents: Vec<&Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// A cargo project at 1.0.0 with a feature and a fix after the v1.0.0 tag
fn setup_project() -> (TempDir, Git2Repo) {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    let first = commit_file(&repo, dir.path(), "Cargo.toml", CARGO_TOML, "feat: initial release");
    repo.tag_lightweight("v1.0.0", &repo.find_object(first, None).unwrap(), false)
        .unwrap();
    commit_file(
        &repo,
        dir.path(),
        "lib.rs",
        "pub fn a() {}\n",
        "feat(api): add the a function",
    );
    commit_file(
        &repo,
        dir.path(),
        "lib.rs",
        "pub fn a() -> u8 { 0 }\n",
        "fix: return a value\n\nCallers expected a number.",
    );
    (dir, repo)
}

fn args(dir: &Path, command: ReleaseCommand) -> WorkflowArgs {
    let config_path = dir.join("release.toml");
    if !config_path.exists() {
        fs::write(&config_path, "[release]\ntag_pattern = \"v{version}\"\n").unwrap();
    }
    WorkflowArgs {
        config_path: Some(config_path.to_string_lossy().into_owned()),
        working_dir: PathBuf::from(dir),
        command,
    }
}

fn release(dir: &Path) -> CommandOutcome {
    run_workflow(args(
        dir,
        ReleaseCommand::Release {
            version: "auto".to_string(),
        },
    ))
    .unwrap()
}

fn head_message(repo: &Git2Repo) -> String {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    head.message().unwrap().to_string()
}

#[test]
fn test_full_release() {
    let (dir, repo) = setup_project();

    match release(dir.path()) {
        CommandOutcome::Released(ReleaseOutcome::Released { version, commit, .. }) => {
            assert_eq!(version, Version::new(1, 1, 0));
            assert!(matches!(commit, CommitOutcome::Tagged { ref tag, .. } if tag == "v1.1.0"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert_eq!(manifest, CARGO_TOML.replace("1.0.0", "1.1.0"));

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("## 1.1.0 ("), "got: {}", changelog);
    assert!(changelog.contains("### Features"));
    assert!(changelog.contains("**api:** add the a function"));
    assert!(changelog.contains("### Bug Fixes"));
    assert!(changelog.contains("return a value"));

    assert_eq!(head_message(&repo), "chore(release): 1.1.0");
    let head = repo.head().unwrap().peel_to_commit().unwrap().id();
    let tag = repo
        .revparse_single("v1.1.0")
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    assert_eq!(tag, head);

    // Manifest and changelog were committed
    let statuses = repo.statuses(None).unwrap();
    for entry in statuses.iter() {
        let path = entry.path().unwrap_or_default();
        assert!(
            path != "Cargo.toml" && path != "CHANGELOG.md",
            "{} left uncommitted",
            path
        );
    }
}

#[test]
fn test_second_release_does_nothing() {
    let (dir, repo) = setup_project();
    release(dir.path());
    let head = repo.head().unwrap().peel_to_commit().unwrap().id();
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();

    assert!(matches!(
        release(dir.path()),
        CommandOutcome::Released(ReleaseOutcome::NothingToDo(
            BoundaryNotice::AlreadyReleased { .. }
        ))
    ));

    assert_eq!(repo.head().unwrap().peel_to_commit().unwrap().id(), head);
    assert_eq!(
        fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(),
        changelog
    );
}

#[test]
fn test_check_on_real_repository() {
    let (dir, _repo) = setup_project();

    match run_workflow(args(dir.path(), ReleaseCommand::Check)).unwrap() {
        CommandOutcome::Checked(report) => {
            assert_eq!(report.current_version, Version::new(1, 0, 0));
            assert_eq!(report.recommended_version, Version::new(1, 1, 0));
            assert_eq!(report.latest_tag(), Some("v1.0.0"));
            assert_eq!(report.commit_count, 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_breaking_change_footer_bumps_major() {
    let (dir, repo) = setup_project();
    commit_file(
        &repo,
        dir.path(),
        "lib.rs",
        "pub fn b() {}\n",
        "refactor: rename a to b\n\nBREAKING CHANGE: a() is now b()",
    );

    match release(dir.path()) {
        CommandOutcome::Released(ReleaseOutcome::Released { version, .. }) => {
            assert_eq!(version, Version::new(2, 0, 0))
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("### BREAKING CHANGES"));
    assert!(changelog.contains("a() is now b()"));
}

#[test]
fn test_tag_conflict_is_an_error() {
    let (dir, repo) = setup_project();
    let stale = repo.revparse_single("HEAD~1").unwrap();
    repo.tag_lightweight("v1.5.0", &stale, false).unwrap();

    let result = run_workflow(args(
        dir.path(),
        ReleaseCommand::Commit {
            version: Some("1.5.0".to_string()),
        },
    ));
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("v1.5.0"), "got: {}", message);
    assert!(head_message(&repo).starts_with("fix: return a value"));
}

#[test]
fn test_subdirectory_is_rejected() {
    let (dir, _repo) = setup_project();
    let nested = dir.path().join("src");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("release.toml"), "").unwrap();

    let result = run_workflow(WorkflowArgs {
        config_path: Some(dir.path().join("release.toml").to_string_lossy().into_owned()),
        working_dir: nested,
        command: ReleaseCommand::Check,
    });
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("project root"), "got: {}", message);
}

#[test]
fn test_release_steps_as_separate_commands() {
    let (dir, repo) = setup_project();

    let outcome = run_workflow(args(
        dir.path(),
        ReleaseCommand::UpdateVersion {
            version: None,
            print_only: false,
        },
    ))
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::VersionUpdated(_)));
    let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert!(manifest.contains("version = \"1.1.0\""));

    // Each command runs with fresh state, as a new process would
    let outcome = run_workflow(args(
        dir.path(),
        ReleaseCommand::Changelog {
            version: Some("1.1.0".to_string()),
            print_only: false,
        },
    ))
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::ChangelogUpdated(_)));
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("## 1.1.0 ("), "got: {}", changelog);

    match run_workflow(args(
        dir.path(),
        ReleaseCommand::Commit {
            version: Some("1.1.0".to_string()),
        },
    ))
    .unwrap()
    {
        CommandOutcome::Committed(CommitOutcome::Tagged { tag, .. }) => assert_eq!(tag, "v1.1.0"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(head_message(&repo), "chore(release): 1.1.0");

    assert!(matches!(
        release(dir.path()),
        CommandOutcome::Released(ReleaseOutcome::NothingToDo(
            BoundaryNotice::AlreadyReleased { .. }
        ))
    ));
}

#[test]
fn test_steps_without_version_follow_the_manifest() {
    let (dir, _repo) = setup_project();

    run_workflow(args(
        dir.path(),
        ReleaseCommand::UpdateVersion {
            version: None,
            print_only: false,
        },
    ))
    .unwrap();

    match run_workflow(args(
        dir.path(),
        ReleaseCommand::Changelog {
            version: None,
            print_only: true,
        },
    ))
    .unwrap()
    {
        CommandOutcome::ChangelogPreview(text) => {
            assert!(text.starts_with("## 1.1.0 ("), "got: {}", text)
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
