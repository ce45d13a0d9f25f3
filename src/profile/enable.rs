//! `profile enable`

use super::{ProfileLocation, ProfileManager, DEFAULT_REVISION};
use crate::{Result, WksctlError};
use gitcmd::CloneOptions;
use std::fs;

/// Options for enabling a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableOptions {
    /// Git URL or alias of the profile repository
    pub repository: String,
    /// Branch, tag or commit to use; `None` keeps the clone's default branch
    pub revision: Option<String>,
    /// Skip staging, committing and pushing
    pub no_commit: bool,
}

impl EnableOptions {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            revision: Some(DEFAULT_REVISION.to_string()),
            no_commit: false,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn without_commit(mut self) -> Self {
        self.no_commit = true;
        self
    }
}

impl ProfileManager {
    /// Clone a profile into the cluster repository as a plain file tree
    ///
    /// A failed clone or checkout leaves nothing behind in the profile
    /// directory. Once the clone succeeded the steps are not rolled back:
    /// a failing commit or push leaves the profile files in place.
    pub fn enable(&self, options: &EnableOptions) -> Result<ProfileLocation> {
        let location = self.locate(&options.repository)?;

        tracing::info!(
            revision = options.revision.as_deref().unwrap_or("default"),
            "Cloning into {:?} ...",
            location.relative_path
        );
        let clone_options = CloneOptions {
            url: location.url.clone(),
            revision: options.revision.clone(),
        };
        self.git
            .clone_in_path(&location.relative_path, &clone_options)?;

        let git_dir = location.path.join(".git");
        tracing::info!("Removing .git directory ...");
        fs::remove_dir_all(&git_dir).map_err(WksctlError::filesystem("remove", &git_dir))?;

        if options.no_commit {
            tracing::info!("Skipping commit and push (--no-commit)");
            return Ok(location);
        }

        tracing::info!("Adding profile {} to the local repository ...", location.url);
        self.git.add(&[&location.relative_path])?;
        tracing::info!("Added profile from {}", location.url);

        self.commit_and_push(&format!("Enable profile: {}", location.url))?;
        Ok(location)
    }
}
