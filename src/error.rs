use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for semver-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Can only run at the project root {}, but started in {}", .root.display(), .cwd.display())]
    NotAtProjectRoot { cwd: PathBuf, root: PathBuf },

    #[error("Refresh already in progress")]
    ConcurrentRefresh,

    #[error("Invalid version \"{0}\"")]
    InvalidVersion(String),

    #[error("New version \"{requested}\" must be greater than current version \"{current}\"")]
    VersionNotGreater { requested: String, current: String },

    #[error("Tag {tag} already exists at {tag_hash} but HEAD is {head_hash}; refusing to move it")]
    TagConflict {
        tag: String,
        tag_hash: String,
        head_hash: String,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Project manifest error ({}): {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a manifest error tied to the file it concerns
    pub fn manifest(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        ReleaseError::Manifest {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("bad tag_pattern");
        assert_eq!(err.to_string(), "Configuration error: bad tag_pattern");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_not_at_project_root_names_both_paths() {
        let err = ReleaseError::NotAtProjectRoot {
            cwd: PathBuf::from("/work/app/src"),
            root: PathBuf::from("/work/app"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/work/app/src"));
        assert!(msg.contains("project root /work/app"));
    }

    #[test]
    fn test_version_not_greater_message() {
        let err = ReleaseError::VersionNotGreater {
            requested: "1.2.3".to_string(),
            current: "1.2.3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "New version \"1.2.3\" must be greater than current version \"1.2.3\""
        );
    }

    #[test]
    fn test_tag_conflict_message() {
        let err = ReleaseError::TagConflict {
            tag: "v1.1.0".to_string(),
            tag_hash: "aaa".to_string(),
            head_hash: "bbb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("v1.1.0"));
        assert!(msg.contains("aaa"));
        assert!(msg.contains("bbb"));
    }

    #[test]
    fn test_manifest_error_includes_path() {
        let err = ReleaseError::manifest("/tmp/Cargo.toml", "no version field");
        let msg = err.to_string();
        assert!(msg.starts_with("Project manifest error"));
        assert!(msg.contains("/tmp/Cargo.toml"));
        assert!(msg.contains("no version field"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::changelog("x"), "Changelog error"),
            (ReleaseError::InvalidVersion("x".to_string()), "Invalid version"),
            (ReleaseError::ConcurrentRefresh, "Refresh already in progress"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
