//! wksctl configuration file handling
//!
//! Loads ~/.config/wksctl/config.yaml. Every field has a default, so the file
//! is optional.

use crate::Result;
use gitcmd::{ClientParams, CommitAuthor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Profiles directory inside the cluster repository
pub const DEFAULT_STORE_ROOT: &str = "profiles";

/// Built-in shortcut for the EKS quickstart app-dev profile
pub const APP_DEV_ALIAS: &str = "app-dev";
pub const APP_DEV_REPO_URL: &str = "git@github.com:weaveworks/eks-quickstart-app-dev";

/// Git identity and authentication settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    /// Commit author name; git's own configuration is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Commit author email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Private key for SSH remotes (exported as GIT_SSH_COMMAND)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ssh_key_path: Option<PathBuf>,
}

/// Profile management configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Where profiles are stored, relative to the cluster repository
    #[serde(default = "default_store_root")]
    pub store_root: PathBuf,

    /// Repository shortcuts (alias -> Git URL)
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,

    /// Reject non-SSH repository URLs
    #[serde(default)]
    pub require_ssh_urls: bool,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_store_root() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_ROOT)
}

fn default_aliases() -> BTreeMap<String, String> {
    let mut aliases = BTreeMap::new();
    aliases.insert(APP_DEV_ALIAS.to_string(), APP_DEV_REPO_URL.to_string());
    aliases
}

impl ProfileConfig {
    pub fn new() -> Self {
        Self {
            store_root: default_store_root(),
            aliases: default_aliases(),
            require_ssh_urls: false,
            git: GitConfig::default(),
        }
    }

    /// Load the default config file, falling back to defaults if it is absent
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::new())
        }
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::WksctlError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "Loading wksctl configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            store_root = %config.store_root.display(),
            aliases = config.aliases.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/wksctl/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("wksctl");
        path.push("config.yaml");
        path
    }

    /// Replace a known alias with its repository URL
    pub fn resolve_alias<'a>(&'a self, repository: &'a str) -> &'a str {
        match self.aliases.get(repository) {
            Some(url) => {
                tracing::debug!(alias = repository, url = %url, "Resolved repository alias");
                url
            }
            None => repository,
        }
    }

    pub fn commit_author(&self) -> CommitAuthor {
        CommitAuthor {
            name: self.git.user_name.clone(),
            email: self.git.user_email.clone(),
        }
    }

    pub fn client_params(&self) -> ClientParams {
        ClientParams {
            private_ssh_key_path: self.git.private_ssh_key_path.clone(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::new()
    }
}
