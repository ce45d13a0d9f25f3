//! Git URL classification
//!
//! Understands the two URL shapes git itself accepts for remotes:
//! transport URLs (`ssh://`, `https://`, `file://`, ...) and the scp-like
//! `user@host:path` form. Anything else (plain local paths, empty strings)
//! is not a Git URL.

use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Transports git can clone from
const TRANSPORTS: &[&str] = &[
    "ssh", "git", "git+ssh", "http", "https", "ftp", "ftps", "rsync", "file",
];

lazy_static! {
    // A slash before the first colon means a local path, not a host.
    static ref SCP_LIKE: Regex = Regex::new(
        r"^(?:(?P<user>[^@/]+)@)?(?P<host>[^:\s/]+):(?:(?P<port>[0-9]{1,5})/)?(?P<path>[^\\].*)$"
    )
    .expect("scp-like pattern is valid");
}

/// A parsed Git remote URL
///
/// Host names are lowercased. Repository paths are kept as typed for
/// scp-like addresses and percent-decoded for transport URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUrl {
    raw: String,
    url: Url,
    host: Option<String>,
    path: String,
}

impl GitUrl {
    /// Parse a transport or scp-like Git URL
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidUrl("empty Git URL".to_string()));
        }

        let (url, host, path) = if let Some((scheme, _)) = raw.split_once("://") {
            let scheme = scheme.to_ascii_lowercase();
            if !TRANSPORTS.contains(&scheme.as_str()) {
                return Err(Error::InvalidUrl(format!(
                    "unsupported transport '{}' in '{}'",
                    scheme, raw
                )));
            }
            let url = Url::parse(raw)
                .map_err(|e| Error::InvalidUrl(format!("unable to parse '{}': {}", raw, e)))?;
            let host = url
                .host_str()
                .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
                .map(str::to_ascii_lowercase);
            let path = urlencoding::decode(url.path())
                .map_err(|e| {
                    Error::InvalidUrl(format!("unable to decode path of '{}': {}", raw, e))
                })?
                .into_owned();
            (url, host, path)
        } else if let Some(caps) = SCP_LIKE.captures(raw) {
            let mut normalized = String::from("ssh://");
            if let Some(user) = caps.name("user") {
                normalized.push_str(user.as_str());
                normalized.push('@');
            }
            normalized.push_str(&caps["host"]);
            if let Some(port) = caps.name("port") {
                normalized.push(':');
                normalized.push_str(port.as_str());
            }
            normalized.push('/');
            normalized.push_str(&caps["path"]);
            let url = Url::parse(&normalized)
                .map_err(|e| Error::InvalidUrl(format!("unable to parse '{}': {}", raw, e)))?;

            // host and path come from the address itself, not the re-encoded URL
            let host = Some(caps["host"].to_ascii_lowercase());
            let typed = &caps["path"];
            let path = if typed.starts_with('/') {
                typed.to_string()
            } else {
                format!("/{}", typed)
            };
            (url, host, path)
        } else {
            return Err(Error::InvalidUrl(format!(
                "'{}' is neither a transport URL nor an scp-like address",
                raw
            )));
        };

        Ok(Self {
            raw: raw.to_string(),
            url,
            host: host.filter(|h| !h.is_empty()),
            path,
        })
    }

    /// The URL exactly as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Transport scheme; scp-like addresses report `ssh`
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Lowercased host name without port or IPv6 brackets
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Decoded URL path, starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Repository path relative to the host, without a trailing `.git`
    ///
    /// Only the exact `.git` suffix is removed: `org/digit` stays `org/digit`.
    pub fn repo_path(&self) -> &str {
        let path = self.path.trim_start_matches('/');
        path.strip_suffix(".git").unwrap_or(path)
    }

    /// True for `ssh`/`git` transports, including scp-like addresses
    pub fn is_ssh(&self) -> bool {
        matches!(self.scheme(), "ssh" | "git")
    }
}

impl FromStr for GitUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Returns true if the argument is an absolute Git URL with a host
pub fn is_git_url(raw: &str) -> bool {
    GitUrl::parse(raw)
        .map(|url| url.host().is_some())
        .unwrap_or(false)
}

/// Returns the host name and the repository path of a Git URL
pub fn host_and_repo_path(raw: &str) -> Result<(String, String)> {
    let url = GitUrl::parse(raw)?;
    let host = url.host().unwrap_or_default().to_string();
    Ok((host, url.repo_path().to_string()))
}

/// Accept only SSH Git URLs
pub fn validate_ssh_url(raw: &str) -> Result<GitUrl> {
    if raw.is_empty() {
        return Err(Error::InvalidUrl("empty Git URL".to_string()));
    }
    let url = GitUrl::parse(raw)
        .ok()
        .filter(|u| u.host().is_some())
        .ok_or_else(|| Error::InvalidUrl(format!("invalid Git URL: {}", raw)))?;
    if !url.is_ssh() {
        return Err(Error::SshRequired(raw.to_string()));
    }
    Ok(url)
}
