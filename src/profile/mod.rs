//! Profile management
//!
//! A profile is a Git repository copied into the cluster repository under
//! `<store_root>/<host>/<repo path>`. Enabling clones it there as a plain
//! file tree; disabling deletes that tree. Both optionally commit and push
//! the result from the cluster repository.

mod disable;
mod enable;

pub use disable::DisableOptions;
pub use enable::EnableOptions;

use crate::config::ProfileConfig;
use crate::{Result, WksctlError};
use gitcmd::{CommitOutcome, Git};
use std::path::{Component, Path, PathBuf};

/// Revision checked out when none is given
pub const DEFAULT_REVISION: &str = "master";

/// Where a profile lives in the cluster repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocation {
    /// Repository URL after alias resolution
    pub url: String,
    /// `<store_root>/<host>/<repo path>`, relative to the cluster repository
    pub relative_path: PathBuf,
    /// Same location joined onto the cluster repository directory
    pub path: PathBuf,
}

/// Enables and disables profiles in one cluster repository
#[derive(Debug, Clone)]
pub struct ProfileManager {
    config: ProfileConfig,
    /// Client working in the cluster repository
    git: Git,
}

impl ProfileManager {
    /// The cluster repository is the client's working directory
    pub fn new(config: ProfileConfig, git: Git) -> Self {
        Self { config, git }
    }

    pub fn repo_dir(&self) -> &Path {
        self.git.workdir()
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Resolve aliases, validate the URL and compute the storage location
    pub fn locate(&self, repository: &str) -> Result<ProfileLocation> {
        if repository.is_empty() {
            return Err(WksctlError::InvalidArgument(
                "profile repository must be specified".to_string(),
            ));
        }

        let url = self.config.resolve_alias(repository);
        if !gitcmd::is_git_url(url) {
            return Err(WksctlError::InvalidRepository(format!(
                "{} is not a Git URL",
                url
            )));
        }
        if self.config.require_ssh_urls {
            gitcmd::validate_ssh_url(url)
                .map_err(|e| WksctlError::InvalidRepository(e.to_string()))?;
        }

        let (host, repo_path) = gitcmd::host_and_repo_path(url)?;
        let repo_path = Path::new(&repo_path);
        if repo_path.as_os_str().is_empty() {
            return Err(WksctlError::InvalidRepository(format!(
                "{} has no repository path",
                url
            )));
        }
        if repo_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(WksctlError::InvalidRepository(format!(
                "{} has a repository path that leaves the profiles directory",
                url
            )));
        }

        let relative_path = self.config.store_root.join(&host).join(repo_path);
        let path = self.repo_dir().join(&relative_path);

        Ok(ProfileLocation {
            url: url.to_string(),
            relative_path,
            path,
        })
    }

    /// Commit whatever is staged and push it
    fn commit_and_push(&self, message: &str) -> Result<()> {
        tracing::info!("Committing the changes ...");
        match self.git.commit(message, &self.config.commit_author())? {
            CommitOutcome::Committed => tracing::info!("Committed the changes"),
            CommitOutcome::NothingToCommit => tracing::info!("No changes were staged"),
        }

        tracing::info!("Pushing to the remote ...");
        self.git.push()?;
        tracing::info!("Pushed successfully");
        Ok(())
    }
}
