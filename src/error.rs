//! Error types for wksctl
//!
//! One enum covers every way a profile command can fail. Nothing below
//! `main` terminates the process; errors are returned and reported once.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wksctl operations
pub type Result<T> = std::result::Result<T, WksctlError>;

#[derive(Error, Debug)]
pub enum WksctlError {
    /// Missing or malformed command arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Repository is not an acceptable Git URL
    #[error("Invalid repository: {0}")]
    InvalidRepository(String),

    /// Disable requested for a profile that is not on disk
    #[error("Profile is not enabled: {} does not exist", .0.display())]
    ProfileNotEnabled(PathBuf),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failures from the git subprocess layer
    #[error("Git error: {0}")]
    Git(#[from] gitcmd::Error),

    /// Filesystem errors with the path involved
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WksctlError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| WksctlError::Filesystem {
            action,
            path,
            source,
        }
    }

    /// Errors caused by what the user typed rather than by the environment
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            WksctlError::InvalidArgument(_)
                | WksctlError::InvalidRepository(_)
                | WksctlError::ProfileNotEnabled(_)
        )
    }
}
