//! git CLI wrapper for Rust
//!
//! A small, typed interface over the `git` executable. Every operation runs
//! `git` as a subprocess in the client's working directory; the client itself
//! never changes after construction.
//!
//! # Example
//!
//! ```no_run
//! use gitcmd::{ClientParams, CloneOptions, CommitAuthor, Git};
//!
//! let git = Git::new(ClientParams::default());
//!
//! // Clone a repository at a tag; the returned client works inside the clone
//! let clone = git.clone_in_path(
//!     "profiles/github.com/org/profile-x",
//!     &CloneOptions::new("git@github.com:org/profile-x").with_revision("v1.0"),
//! )?;
//! println!("cloned into {}", clone.workdir().display());
//!
//! // Stage, commit and push from the enclosing repository
//! git.add(&["profiles/github.com/org/profile-x"])?;
//! git.commit("Enable profile", &CommitAuthor::default())?;
//! git.push()?;
//! # Ok::<(), gitcmd::Error>(())
//! ```

pub mod giturl;

pub use giturl::{host_and_repo_path, is_git_url, validate_ssh_url, GitUrl};

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Errors that can occur when running git
#[derive(Error, Debug)]
pub enum Error {
    #[error("git is not installed or not in PATH")]
    NotInstalled,

    #[error("`{command}` failed with {status}{}", stderr_detail(.stderr))]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Invalid Git URL: {0}")]
    InvalidUrl(String),

    #[error("got a non-SSH Git URL ({0}), but only SSH Git URLs are supported")]
    SshRequired(String),

    #[error("Unable to create directory {} for cloning: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn stderr_detail(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, Error>;

/// What happens to a child process's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Share the parent's stdout/stderr so git output reaches the user as-is
    #[default]
    Inherit,
    /// Capture output; stderr is attached to `Error::CommandFailed`
    Capture,
}

/// Arguments used to construct a client
#[derive(Debug, Clone, Default)]
pub struct ClientParams {
    /// Private key used for SSH remotes
    pub private_ssh_key_path: Option<PathBuf>,
}

impl ClientParams {
    fn env_vars(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(ref key) = self.private_ssh_key_path {
            vars.push((
                "GIT_SSH_COMMAND".to_string(),
                format!("ssh -i {}", key.display()),
            ));
        }
        vars
    }
}

/// Options for cloning a repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    pub url: String,
    /// Branch, tag or commit to check out after cloning
    pub revision: Option<String>,
}

impl CloneOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            revision: None,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }
}

/// Identity recorded on commits; empty fields fall back to git's own config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CommitAuthor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }

    /// `--author` flag, if any identity was supplied
    fn author_flag(&self) -> Option<String> {
        if self.name().is_none() && self.email().is_none() {
            return None;
        }
        Some(format!(
            "--author={} <{}>",
            self.name().unwrap_or_default(),
            self.email().unwrap_or_default()
        ))
    }
}

/// Result of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Nothing was staged; no commit was created
    NothingToCommit,
}

/// git CLI wrapper bound to one working directory
#[derive(Debug, Clone)]
pub struct Git {
    /// Working directory for every command
    workdir: PathBuf,
    /// Environment overrides added on top of the inherited environment
    env: Vec<(String, String)>,
    output: OutputMode,
}

impl Git {
    /// Create a client for the current directory
    pub fn new(params: ClientParams) -> Self {
        let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_workdir(workdir, params)
    }

    /// Create a client for a specific working directory
    pub fn with_workdir(path: impl Into<PathBuf>, params: ClientParams) -> Self {
        Self {
            workdir: path.into(),
            env: params.env_vars(),
            output: OutputMode::default(),
        }
    }

    /// A client with the same environment, working in `path`
    ///
    /// Relative paths are resolved against this client's working directory.
    pub fn in_dir(&self, path: impl AsRef<Path>) -> Self {
        Self {
            workdir: self.resolve(path.as_ref()),
            env: self.env.clone(),
            output: self.output,
        }
    }

    /// Add an environment override
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    /// Check if git can be executed
    pub fn is_available(&self) -> bool {
        self.version().is_ok()
    }

    /// `git --version` output
    pub fn version(&self) -> Result<String> {
        let output = Command::new("git")
            .arg("--version")
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .output()
            .map_err(spawn_error)?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: "git --version".to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    // --- Index operations ---

    /// `git add -- <paths>`
    pub fn add<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        let mut args: Vec<OsString> = vec!["add".into(), "--".into()];
        args.extend(paths.iter().map(|p| p.as_ref().as_os_str().to_os_string()));
        self.run_command(args)
    }

    /// `git rm -r -- <paths>`
    pub fn remove_recursive<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        let mut args: Vec<OsString> = vec!["rm".into(), "-r".into(), "--".into()];
        args.extend(paths.iter().map(|p| p.as_ref().as_os_str().to_os_string()));
        self.run_command(args)
    }

    /// Commit staged changes
    ///
    /// Committing with nothing staged is a no-op that reports
    /// [`CommitOutcome::NothingToCommit`]. A supplied author is also written
    /// to the repository-local `user.name`/`user.email` so that git does not
    /// fall back to global configuration.
    pub fn commit(&self, message: &str, author: &CommitAuthor) -> Result<CommitOutcome> {
        match self.run_command(["diff", "--cached", "--quiet"]) {
            Ok(()) => {
                tracing::info!(
                    "Nothing to commit (the repository contained identical files), moving on"
                );
                return Ok(CommitOutcome::NothingToCommit);
            }
            Err(Error::CommandFailed { .. }) => {}
            Err(e) => return Err(e),
        }

        if let Some(email) = author.email() {
            self.run_command(["config", "user.email", email])?;
        }
        if let Some(name) = author.name() {
            self.run_command(["config", "user.name", name])?;
        }

        let mut args = vec![
            "commit".to_string(),
            "-m".to_string(),
            message.to_string(),
        ];
        match author.author_flag() {
            Some(flag) => args.push(flag),
            None => tracing::debug!("No commit identity supplied, using git configuration"),
        }

        self.run_command(args)?;
        Ok(CommitOutcome::Committed)
    }

    // --- Remote operations ---

    /// `git push` to the configured upstream
    pub fn push(&self) -> Result<()> {
        self.run_command(["push"])
    }

    /// `git checkout <revision>`
    pub fn checkout(&self, revision: &str) -> Result<()> {
        self.run_command(["checkout", revision])
    }

    /// Clone into `path`, creating it if needed, and check out the revision
    ///
    /// Returns a client working inside the clone; `self` is left untouched.
    /// If anything fails and `path` did not exist beforehand, it is removed
    /// again so no half-cloned tree is left behind.
    pub fn clone_in_path(&self, path: impl AsRef<Path>, options: &CloneOptions) -> Result<Git> {
        let path = path.as_ref();
        let target = self.resolve(path);
        let existed = target.exists();

        fs::create_dir_all(&target).map_err(|source| Error::CreateDir {
            path: target.clone(),
            source,
        })?;

        match self.clone_and_checkout(path, options) {
            Ok(clone) => Ok(clone),
            Err(err) => {
                if !existed {
                    if let Err(cleanup) = fs::remove_dir_all(&target) {
                        tracing::warn!(
                            path = %target.display(),
                            error = %cleanup,
                            "Failed to clean up after unsuccessful clone"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    fn clone_and_checkout(&self, path: &Path, options: &CloneOptions) -> Result<Git> {
        let args: [&OsStr; 4] = [
            OsStr::new("clone"),
            OsStr::new("--"),
            OsStr::new(&options.url),
            path.as_os_str(),
        ];
        self.run_command(args)?;

        let clone = self.in_dir(path);
        if let Some(revision) = options.revision.as_deref().filter(|r| !r.is_empty()) {
            clone.checkout(revision)?;
        }
        Ok(clone)
    }

    // --- Raw command execution ---

    /// Run an arbitrary git command
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<()> {
        self.run_command(args)
    }

    // --- Private helpers ---

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    fn run_command<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();
        let command = describe(&args);

        if !self.workdir.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "working directory {} does not exist",
                    self.workdir.display()
                ),
            )));
        }

        tracing::debug!(command = %command, workdir = %self.workdir.display(), "Running git");

        let mut cmd = Command::new("git");
        cmd.args(&args).current_dir(&self.workdir);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let (status, stderr) = match self.output {
            OutputMode::Inherit => (cmd.status().map_err(spawn_error)?, String::new()),
            OutputMode::Capture => {
                let output = cmd
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .map_err(spawn_error)?;
                (
                    output.status,
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                )
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command,
                status,
                stderr,
            })
        }
    }
}

fn spawn_error(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::NotInstalled
    } else {
        Error::Io(err)
    }
}

fn describe(args: &[OsString]) -> String {
    let mut parts = vec!["git".to_string()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_installed() -> bool {
        Git::with_workdir(".", ClientParams::default()).is_available()
    }

    /// Run git directly for fixture setup
    fn sh(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Fixture", "-c", "user.email=fixture@example.com"])
            .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=master"])
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn fixture_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        sh(dir.path(), &["init", "-q"]);
        fs::write(dir.path().join("README.md"), "profile\n").unwrap();
        sh(dir.path(), &["add", "README.md"]);
        sh(dir.path(), &["commit", "-q", "-m", "initial"]);
        sh(dir.path(), &["tag", "v1.0"]);
        dir
    }

    fn client(dir: &Path) -> Git {
        Git::with_workdir(dir, ClientParams::default())
            .with_output(OutputMode::Capture)
            .with_env("GIT_CONFIG_NOSYSTEM", "1")
            .with_env("GIT_CONFIG_GLOBAL", "/dev/null")
    }

    fn commit_count(dir: &Path) -> String {
        let out = Command::new("git")
            .args(["rev-list", "--count", "HEAD"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    }

    #[test]
    fn test_with_workdir() {
        let git = Git::with_workdir("/tmp", ClientParams::default());
        assert_eq!(git.workdir(), Path::new("/tmp"));
        assert!(git.env_vars().is_empty());
        assert_eq!(git.output, OutputMode::Inherit);
    }

    #[test]
    fn test_private_key_sets_ssh_command() {
        let git = Git::with_workdir(
            "/tmp",
            ClientParams {
                private_ssh_key_path: Some(PathBuf::from("/home/me/.ssh/deploy")),
            },
        );
        assert_eq!(
            git.env_vars(),
            &[(
                "GIT_SSH_COMMAND".to_string(),
                "ssh -i /home/me/.ssh/deploy".to_string()
            )]
        );
    }

    #[test]
    fn test_in_dir_keeps_environment() {
        let git = Git::with_workdir("/repo", ClientParams::default())
            .with_env("FOO", "bar")
            .with_output(OutputMode::Capture);
        let nested = git.in_dir("profiles/example.com/org/x");
        assert_eq!(nested.workdir(), Path::new("/repo/profiles/example.com/org/x"));
        assert_eq!(nested.env_vars(), git.env_vars());
        assert_eq!(nested.output, OutputMode::Capture);

        let absolute = git.in_dir("/elsewhere");
        assert_eq!(absolute.workdir(), Path::new("/elsewhere"));
        // the original client is unchanged
        assert_eq!(git.workdir(), Path::new("/repo"));
    }

    #[test]
    fn test_author_flag() {
        assert_eq!(CommitAuthor::default().author_flag(), None);
        assert_eq!(
            CommitAuthor {
                name: Some(String::new()),
                email: Some(String::new())
            }
            .author_flag(),
            None
        );
        assert_eq!(
            CommitAuthor::new("Flux", "flux@example.com").author_flag(),
            Some("--author=Flux <flux@example.com>".to_string())
        );
    }

    #[test]
    fn test_clone_options_builder() {
        let opts = CloneOptions::new("git@github.com:org/x").with_revision("v1.0");
        assert_eq!(opts.url, "git@github.com:org/x");
        assert_eq!(opts.revision.as_deref(), Some("v1.0"));
        assert_eq!(CloneOptions::new("u").revision, None);
    }

    #[test]
    fn test_command_failed_display() {
        use std::os::unix::process::ExitStatusExt;

        let err = Error::CommandFailed {
            command: "git push".to_string(),
            status: ExitStatus::from_raw(256),
            stderr: "fatal: no upstream\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`git push` failed with exit status: 1: fatal: no upstream"
        );
    }

    #[test]
    fn test_ssh_required_display() {
        let err = Error::SshRequired("rsync://example.com/org/x".to_string());
        assert_eq!(
            err.to_string(),
            "got a non-SSH Git URL (rsync://example.com/org/x), but only SSH Git URLs are supported"
        );
    }

    #[test]
    fn test_missing_workdir_is_reported() {
        let git = Git::with_workdir("/definitely/not/here", ClientParams::default());
        assert!(matches!(git.push(), Err(Error::Io(_))));
    }

    #[test]
    fn test_commit_is_noop_when_nothing_staged() {
        if !git_installed() {
            return;
        }
        let repo = fixture_repo();
        let git = client(repo.path());
        let author = CommitAuthor::new("Tester", "tester@example.com");

        fs::write(repo.path().join("extra.txt"), "x").unwrap();
        git.add(&["extra.txt"]).unwrap();
        assert_eq!(git.commit("add extra", &author).unwrap(), CommitOutcome::Committed);
        assert_eq!(commit_count(repo.path()), "2");

        assert_eq!(
            git.commit("add extra", &author).unwrap(),
            CommitOutcome::NothingToCommit
        );
        assert_eq!(
            git.commit("add extra", &author).unwrap(),
            CommitOutcome::NothingToCommit
        );
        assert_eq!(commit_count(repo.path()), "2");
    }

    #[test]
    fn test_push_without_remote_fails_with_stderr() {
        if !git_installed() {
            return;
        }
        let repo = fixture_repo();
        let err = client(repo.path()).push().unwrap_err();
        match err {
            Error::CommandFailed {
                command,
                status,
                stderr,
            } => {
                assert_eq!(command, "git push");
                assert!(!status.success());
                assert!(!stderr.trim().is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_commit_without_identity_fails() {
        if !git_installed() {
            return;
        }
        let identity_vars = [
            "GIT_AUTHOR_NAME",
            "GIT_AUTHOR_EMAIL",
            "GIT_COMMITTER_NAME",
            "GIT_COMMITTER_EMAIL",
            "EMAIL",
        ];
        if identity_vars.iter().any(|v| std::env::var_os(v).is_some()) {
            return;
        }
        let repo = fixture_repo();
        let git = client(repo.path())
            .with_env("GIT_CONFIG_COUNT", "1")
            .with_env("GIT_CONFIG_KEY_0", "user.useConfigOnly")
            .with_env("GIT_CONFIG_VALUE_0", "true");

        fs::write(repo.path().join("extra.txt"), "x").unwrap();
        git.add(&["extra.txt"]).unwrap();
        let err = git.commit("add extra", &CommitAuthor::default()).unwrap_err();

        match err {
            Error::CommandFailed { command, stderr, .. } => {
                assert!(command.starts_with("git commit"));
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(commit_count(repo.path()), "1");
    }

    #[test]
    fn test_remove_recursive_stages_deletion() {
        if !git_installed() {
            return;
        }
        let repo = fixture_repo();
        let git = client(repo.path());

        fs::create_dir_all(repo.path().join("dir/sub")).unwrap();
        fs::write(repo.path().join("dir/sub/file"), "x").unwrap();
        git.add(&["dir"]).unwrap();
        git.commit("add dir", &CommitAuthor::new("T", "t@example.com"))
            .unwrap();

        git.remove_recursive(&["dir"]).unwrap();
        assert!(!repo.path().join("dir").exists());
        assert_eq!(
            git.commit("remove dir", &CommitAuthor::new("T", "t@example.com"))
                .unwrap(),
            CommitOutcome::Committed
        );
    }

    #[test]
    fn test_add_unknown_path_fails_with_stderr() {
        if !git_installed() {
            return;
        }
        let repo = fixture_repo();
        let err = client(repo.path()).add(&["missing.txt"]).unwrap_err();
        match err {
            Error::CommandFailed { command, stderr, .. } => {
                assert_eq!(command, "git add -- missing.txt");
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clone_in_path_returns_client_for_clone() {
        if !git_installed() {
            return;
        }
        let source = fixture_repo();
        let work = TempDir::new().unwrap();
        let git = client(work.path());

        let url = format!("file://{}", source.path().display());
        let clone = git
            .clone_in_path("nested/clone", &CloneOptions::new(url).with_revision("v1.0"))
            .unwrap();

        assert_eq!(clone.workdir(), work.path().join("nested/clone"));
        assert_eq!(git.workdir(), work.path());
        assert!(work.path().join("nested/clone/README.md").exists());
        assert!(work.path().join("nested/clone/.git").exists());
    }

    #[test]
    fn test_clone_in_path_cleans_up_on_bad_revision() {
        if !git_installed() {
            return;
        }
        let source = fixture_repo();
        let work = TempDir::new().unwrap();
        let git = client(work.path());

        let url = format!("file://{}", source.path().display());
        let err = git
            .clone_in_path("clone", &CloneOptions::new(url).with_revision("no-such-ref"))
            .unwrap_err();

        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(!work.path().join("clone").exists());
    }
}
