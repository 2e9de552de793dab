use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Title every breaking-change note carries after parsing.
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

/// A footer note such as `BREAKING CHANGE: the config format changed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNote {
    pub title: String,
    pub text: String,
}

impl CommitNote {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        CommitNote {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Whether this note announces a breaking change (title compared case-insensitively)
    pub fn is_breaking(&self) -> bool {
        self.title.eq_ignore_ascii_case(BREAKING_CHANGE)
    }
}

/// One commit of the history, split into its conventional-commit parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// `feat`, `fix`, `chore`, ... or empty when the header is not conventional
    pub commit_type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: String,
    pub footer: String,
    pub notes: Vec<CommitNote>,
    /// Full commit hash
    pub hash: String,
    /// Tags pointing at this commit
    pub associated_tags: Vec<String>,
    pub committed_at: DateTime<Utc>,
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^(\w+)(?:\(([^)]*)\))?(!)?:\s*(.*)$").expect("header pattern is valid")
    })
}

fn note_regex() -> &'static Regex {
    static NOTE: OnceLock<Regex> = OnceLock::new();
    NOTE.get_or_init(|| {
        Regex::new(r"^[\s*]*(BREAKING CHANGE|BREAKING-CHANGE)[:\s]+(.*)$")
            .expect("note pattern is valid")
    })
}

impl CommitRecord {
    /// Parse a raw commit message according to the conventional commits format
    ///
    /// Supports headers of the form:
    /// - `type(scope)!: subject`
    /// - `type(scope): subject`
    /// - `type!: subject`
    /// - `type: subject`
    /// - non-conventional text (empty type, whole header as subject)
    ///
    /// Everything from the first `BREAKING CHANGE:` / `BREAKING-CHANGE:` line on is
    /// the footer; each such line opens a note that runs until the next one.
    pub fn from_message(
        message: &str,
        hash: impl Into<String>,
        associated_tags: Vec<String>,
        committed_at: DateTime<Utc>,
    ) -> Self {
        let message = message.trim();
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default().trim();

        let (commit_type, scope, subject, bang) = match header_regex().captures(header) {
            Some(captures) => (
                captures[1].to_string(),
                captures
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty()),
                captures
                    .get(4)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                captures.get(3).is_some(),
            ),
            None => (String::new(), None, header.to_string(), false),
        };

        let mut body_lines = Vec::new();
        let mut footer_lines = Vec::new();
        let mut notes: Vec<CommitNote> = Vec::new();

        for line in lines {
            if let Some(captures) = note_regex().captures(line) {
                notes.push(CommitNote::new(BREAKING_CHANGE, captures[2].trim()));
                footer_lines.push(line);
            } else if let Some(note) = notes.last_mut() {
                if !line.trim().is_empty() {
                    if !note.text.is_empty() {
                        note.text.push('\n');
                    }
                    note.text.push_str(line.trim());
                }
                footer_lines.push(line);
            } else {
                body_lines.push(line);
            }
        }

        if bang && !notes.iter().any(CommitNote::is_breaking) {
            notes.push(CommitNote::new(BREAKING_CHANGE, subject.clone()));
        }

        CommitRecord {
            commit_type,
            scope,
            subject,
            body: body_lines.join("\n").trim().to_string(),
            footer: footer_lines.join("\n").trim().to_string(),
            notes,
            hash: hash.into(),
            associated_tags,
            committed_at,
        }
    }

    /// Whether any note marks this commit as breaking
    pub fn is_breaking(&self) -> bool {
        self.notes.iter().any(CommitNote::is_breaking)
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}
