//! wksctl - cluster repository tooling
//!
//! Main entry point for the wksctl CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gitcmd::Git;
use std::path::PathBuf;
use std::process;
use wksctl::config::{validate_config_result, ProfileConfig};
use wksctl::profile::{DisableOptions, EnableOptions, ProfileManager, DEFAULT_REVISION};
use wksctl::style;
use wksctl::WksctlError;

/// wksctl - manage profiles in a cluster repository
#[derive(Parser, Debug)]
#[command(name = "wksctl")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/wksctl/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cluster repository to operate on (default: current directory)
    #[arg(long, global = true)]
    repo_dir: Option<PathBuf>,

    /// Private SSH key used for Git remotes
    #[arg(long, global = true, env = "WKSCTL_GIT_PRIVATE_SSH_KEY_PATH")]
    git_private_ssh_key_path: Option<PathBuf>,

    /// Log every git invocation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage profiles
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// Enable profile
    Enable {
        /// Enable profile from the repository (Git URL or alias)
        #[arg(long)]
        repository: String,

        /// Use this revision of the profile
        #[arg(long, default_value = DEFAULT_REVISION)]
        revision: String,

        /// No auto commit and push behaviour
        #[arg(long)]
        no_commit: bool,
    },

    /// Disable profile
    Disable {
        /// Disable the profile enabled from this repository
        #[arg(long)]
        repository: String,

        /// No auto commit and push behaviour
        #[arg(long)]
        no_commit: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = wksctl::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} Error: {:#}", style::failure_mark(), e);
        let code = match e.downcast_ref::<WksctlError>() {
            Some(err) if err.is_usage_error() => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => ProfileConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProfileConfig::load_or_default().context("Failed to load default config")?,
    };

    if let Some(key) = cli.git_private_ssh_key_path {
        config.git.private_ssh_key_path = Some(key);
    }
    validate_config_result(&config)?;

    let repo_dir = match cli.repo_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    tracing::debug!(repo_dir = %repo_dir.display(), "Using cluster repository");

    let git = Git::with_workdir(&repo_dir, config.client_params());
    let profiles = ProfileManager::new(config, git);

    match cli.command {
        Commands::Profile(ProfileCommands::Enable {
            repository,
            revision,
            no_commit,
        }) => {
            let location = profiles.enable(&EnableOptions {
                repository,
                revision: Some(revision),
                no_commit,
            })?;
            println!(
                "{} Enabled profile {} in {}",
                style::success_mark(),
                style::dim(&location.url),
                style::path_style(&location.relative_path)
            );
        }

        Commands::Profile(ProfileCommands::Disable {
            repository,
            no_commit,
        }) => {
            let location = profiles.disable(&DisableOptions {
                repository,
                no_commit,
            })?;
            println!(
                "{} Disabled profile {} from {}",
                style::success_mark(),
                style::dim(&location.url),
                style::path_style(&location.relative_path)
            );
        }
    }

    Ok(())
}
