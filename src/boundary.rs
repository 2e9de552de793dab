use std::fmt;
use std::path::PathBuf;

use semver::Version;

/// Situations where a release step has nothing to do.
/// These are informational outcomes, reported to the user but never treated as failures.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryNotice {
    /// No commits since the latest release tag
    AlreadyReleased {
        latest_tag: Option<String>,
        current_commit_hash: String,
    },
    /// The commits since the last release warrant no version change
    VersionUnchanged { version: Version },
    /// The manifest already carries the release version
    VersionAlreadyPersisted { version: Version, manifest: PathBuf },
    /// The changelog already starts with this release's fragment
    ChangelogAlreadyUpdated { version: Version },
    /// The release tag exists and points at HEAD
    TagAlreadyAtHead { tag: String },
}

impl fmt::Display for BoundaryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryNotice::AlreadyReleased {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                match latest_tag {
                    Some(tag) => write!(
                        f,
                        "Already released: no new commits since tag '{}' (current: {})",
                        tag, short_hash
                    ),
                    None => write!(f, "Already released: no commits (current: {})", short_hash),
                }
            }
            BoundaryNotice::VersionUnchanged { version } => {
                write!(
                    f,
                    "Nothing to release: no feature, fix or breaking change since {}",
                    version
                )
            }
            BoundaryNotice::VersionAlreadyPersisted { version, manifest } => {
                write!(
                    f,
                    "Version already updated: {} already at {}",
                    manifest.display(),
                    version
                )
            }
            BoundaryNotice::ChangelogAlreadyUpdated { version } => {
                write!(f, "Changelog already updated for {}", version)
            }
            BoundaryNotice::TagAlreadyAtHead { tag } => {
                write!(f, "Tag '{}' already created and already on HEAD", tag)
            }
        }
    }
}
