//! `profile disable`

use super::{ProfileLocation, ProfileManager};
use crate::{Result, WksctlError};
use std::fs;

/// Options for disabling a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableOptions {
    /// Git URL or alias the profile was enabled from
    pub repository: String,
    /// Skip removing from the index, committing and pushing
    pub no_commit: bool,
}

impl DisableOptions {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            no_commit: false,
        }
    }

    pub fn without_commit(mut self) -> Self {
        self.no_commit = true;
        self
    }
}

impl ProfileManager {
    /// Delete an enabled profile from the cluster repository
    pub fn disable(&self, options: &DisableOptions) -> Result<ProfileLocation> {
        let location = self.locate(&options.repository)?;

        if !location.path.exists() {
            return Err(WksctlError::ProfileNotEnabled(location.relative_path));
        }

        tracing::info!("Deleting profile from path {:?} ...", location.relative_path);
        fs::remove_dir_all(&location.path)
            .map_err(WksctlError::filesystem("remove", &location.path))?;
        tracing::info!("Deleted profile from path {:?}", location.relative_path);

        if options.no_commit {
            tracing::info!("Skipping commit and push (--no-commit)");
            return Ok(location);
        }

        tracing::info!("Removing profile from the local repository ...");
        self.git.remove_recursive(&[&location.relative_path])?;
        tracing::info!("Removed profile from the local repository");

        self.commit_and_push(&format!("Disable profile: {}", location.url))?;
        Ok(location)
    }
}
