use crate::domain::CommitRecord;

/// Counts of commit kinds found in the unreleased window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStatistics {
    pub breaking_changes: usize,
    pub features: usize,
    pub fixes: usize,
    pub chores: usize,
    pub other: usize,
}

impl CommitStatistics {
    pub fn is_empty(&self) -> bool {
        *self == CommitStatistics::default()
    }
}

/// Classify commits into statistics buckets.
///
/// Each commit is evaluated on its own: its type may count toward `fixes`,
/// `features` or `chores`, a breaking-change note adds to `breaking_changes`
/// independently, and a commit that counted nowhere lands in `other`.
pub fn classify(commits: &[CommitRecord]) -> CommitStatistics {
    let mut stats = CommitStatistics::default();

    for commit in commits {
        let mut counted = true;
        match commit.commit_type.as_str() {
            "fix" => stats.fixes += 1,
            "feat" => stats.features += 1,
            "chore" => stats.chores += 1,
            _ => counted = false,
        }

        if commit.is_breaking() {
            stats.breaking_changes += 1;
            counted = true;
        }

        if !counted {
            stats.other += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commits(messages: &[&str]) -> Vec<CommitRecord> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| CommitRecord::from_message(m, format!("{:040}", i), Vec::new(), Utc::now()))
            .collect()
    }

    #[test]
    fn test_classify_empty() {
        let stats = classify(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats, CommitStatistics::default());
    }

    #[test]
    fn test_classify_each_bucket() {
        let stats = classify(&commits(&[
            "feat(api): add endpoint",
            "fix(ui): button color",
            "fix(db): connection pool",
            "chore: bump deps",
            "docs: update readme",
            "Updated stuff",
        ]));
        assert_eq!(stats.features, 1);
        assert_eq!(stats.fixes, 2);
        assert_eq!(stats.chores, 1);
        assert_eq!(stats.other, 2);
        assert_eq!(stats.breaking_changes, 0);
    }

    #[test]
    fn test_breaking_counts_independently_of_type() {
        let stats = classify(&commits(&["fix(core)!: drop v1 protocol"]));
        assert_eq!(stats.fixes, 1);
        assert_eq!(stats.breaking_changes, 1);
        assert_eq!(stats.other, 0);
    }

    #[test]
    fn test_breaking_other_type_is_not_other() {
        let stats = classify(&commits(&["refactor: rename\n\nBREAKING CHANGE: renamed"]));
        assert_eq!(stats.breaking_changes, 1);
        assert_eq!(stats.other, 0);
    }

    #[test]
    fn test_every_commit_lands_in_one_type_bucket() {
        let input = commits(&[
            "feat: a",
            "feat!: b",
            "fix: c",
            "chore: d",
            "perf: e",
            "style: f",
            "test: g",
            "random",
        ]);
        let stats = classify(&input);
        let breaking_only = input
            .iter()
            .filter(|c| c.is_breaking() && !["feat", "fix", "chore"].contains(&c.commit_type.as_str()))
            .count();
        assert_eq!(
            stats.features + stats.fixes + stats.chores + stats.other + breaking_only,
            input.len()
        );
        assert_eq!(stats.breaking_changes, 1);
    }

    #[test]
    fn test_classify_does_not_consume_input() {
        let input = commits(&["feat: a", "fix: b"]);
        let before = input.clone();
        let _ = classify(&input);
        assert_eq!(input, before);
    }
}
