use std::fmt::Write;

use crate::changelog::{ChangelogContext, ChangelogFormatter};
use crate::config::ChangelogConfig;
use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};

/// Renders changelog fragments from the `[changelog]` configuration
pub struct TemplateFormatter {
    config: ChangelogConfig,
}

impl TemplateFormatter {
    pub fn new(config: ChangelogConfig) -> Self {
        TemplateFormatter { config }
    }

    fn render_header(&self, context: &ChangelogContext) -> String {
        self.config
            .header
            .replace("{version}", &context.version)
            .replace("{tag}", &context.tag)
            .replace("{date}", &context.date.format("%Y-%m-%d").to_string())
    }

    fn render_line(&self, commit: &CommitRecord, text: &str) -> String {
        let scope = commit
            .scope
            .as_deref()
            .map(|s| format!("**{}:** ", s))
            .unwrap_or_default();

        self.config
            .commit_format
            .replace("{scope}", &scope)
            .replace("{subject}", text)
            .replace("{full_hash}", &commit.hash)
            .replace("{hash}", commit.short_hash())
    }
}

impl ChangelogFormatter for TemplateFormatter {
    fn render(&self, context: &ChangelogContext, commits: &[CommitRecord]) -> Result<String> {
        let mut output = String::new();
        let fmt_err = |e: std::fmt::Error| ReleaseError::changelog(format!("Cannot render: {}", e));

        writeln!(output, "{}", self.render_header(context)).map_err(fmt_err)?;

        for section in &self.config.sections {
            let lines: Vec<String> = commits
                .iter()
                .filter(|c| c.commit_type == section.commit_type)
                .map(|c| self.render_line(c, &c.subject))
                .collect();
            if lines.is_empty() {
                continue;
            }

            write!(output, "\n### {}\n\n", section.title).map_err(fmt_err)?;
            for line in lines {
                writeln!(output, "{}", line).map_err(fmt_err)?;
            }
        }

        let breaking: Vec<String> = commits
            .iter()
            .flat_map(|c| {
                c.notes
                    .iter()
                    .filter(|n| n.is_breaking())
                    .map(move |n| self.render_line(c, &n.text))
            })
            .collect();
        if !breaking.is_empty() {
            write!(output, "\n### {}\n\n", self.config.breaking_title).map_err(fmt_err)?;
            for line in breaking {
                writeln!(output, "{}", line).map_err(fmt_err)?;
            }
        }

        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use semver::Version;

    fn context() -> ChangelogContext {
        ChangelogContext::new(
            &Version::new(1, 1, 0),
            "v1.1.0",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        )
    }

    fn commit(message: &str, hash: &str) -> CommitRecord {
        CommitRecord::from_message(message, hash, Vec::new(), Utc::now())
    }

    #[test]
    fn test_render_sections_in_order() {
        let formatter = TemplateFormatter::new(ChangelogConfig::default());
        let commits = vec![
            commit("fix(ui): modal alignment", "1111111aaaa"),
            commit("feat(api): add user list endpoint", "2222222bbbb"),
            commit("chore: bump deps", "3333333cccc"),
            commit("feat: role-based access", "4444444dddd"),
        ];

        let text = formatter.render(&context(), &commits).unwrap();
        assert_eq!(
            text,
            "## 1.1.0 (2024-03-09)\n\
             \n### Features\n\n\
             * **api:** add user list endpoint (2222222)\n\
             * role-based access (4444444)\n\
             \n### Bug Fixes\n\n\
             * **ui:** modal alignment (1111111)\n\
             \n"
        );
    }

    #[test]
    fn test_render_breaking_notes() {
        let formatter = TemplateFormatter::new(ChangelogConfig::default());
        let commits = vec![commit(
            "feat(core): new engine\n\nBREAKING CHANGE: plugins must be rebuilt",
            "5555555eeee",
        )];

        let text = formatter.render(&context(), &commits).unwrap();
        assert!(text.contains("### BREAKING CHANGES\n\n* **core:** plugins must be rebuilt (5555555)\n"));
    }

    #[test]
    fn test_render_header_only_without_listed_commits() {
        let formatter = TemplateFormatter::new(ChangelogConfig::default());
        let text = formatter
            .render(&context(), &[commit("docs: readme", "6666666ffff")])
            .unwrap();
        assert_eq!(text, "## 1.1.0 (2024-03-09)\n\n");
    }

    #[test]
    fn test_custom_templates() {
        let config = ChangelogConfig {
            header: "# {tag}".to_string(),
            commit_format: "- {subject} [{full_hash}]".to_string(),
            ..ChangelogConfig::default()
        };
        let formatter = TemplateFormatter::new(config);
        let text = formatter
            .render(&context(), &[commit("fix: crash", "abc")])
            .unwrap();
        assert_eq!(text, "# v1.1.0\n\n### Bug Fixes\n\n- crash [abc]\n\n");
    }
}
