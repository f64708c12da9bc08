//! Clones git repositories into a tree laid out by host and owner, the way
//! `go get` does: `<location>/<host>/<owner>/<repo>`.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use url::Url;

pub const LOCATION_VAR: &str = "GLOBAL_GIT_LOCATION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub host: String,
    /// May contain `/` for nested groups.
    pub owner: String,
    pub name: String,
}

impl RepoLocation {
    /// Understands `scheme://[user@]host[:port]/owner/repo[.git]` and the
    /// scp-like `[user@]host:owner/repo[.git]`.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        let (host, path) = if uri.contains("://") {
            let url = Url::parse(uri).with_context(|| format!("Invalid repository URI: {}", uri))?;
            let host = url
                .host_str()
                .ok_or_else(|| anyhow!("Repository URI has no host: {}", uri))?;
            (host.to_string(), url.path().to_string())
        } else {
            let (authority, path) = uri
                .split_once(':')
                .ok_or_else(|| anyhow!("Not a repository URI: {}", uri))?;
            let host = authority
                .rsplit_once('@')
                .map_or(authority, |(_, host)| host);
            (host.to_string(), path.to_string())
        };

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (owner, name) = path
            .rsplit_once('/')
            .ok_or_else(|| anyhow!("Repository URI has no owner: {}", uri))?;

        let segments = || host.split('/').chain(owner.split('/')).chain([name]);
        if segments().any(|s| s.is_empty() || s == "." || s == "..") {
            bail!("Cannot derive a path from repository URI: {}", uri);
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            host,
        })
    }

    pub fn target_path(&self, location: &Path) -> PathBuf {
        let mut path = location.join(&self.host);
        path.extend(self.owner.split('/'));
        path.push(&self.name);
        path
    }
}

/// `$GLOBAL_GIT_LOCATION`, falling back to `~/git`.
pub fn default_location() -> Result<PathBuf> {
    if let Some(location) = env::var_os(LOCATION_VAR).filter(|l| !l.is_empty()) {
        return Ok(PathBuf::from(location));
    }
    let home = env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .ok_or_else(|| anyhow!("Neither {} nor HOME is set", LOCATION_VAR))?;
    Ok(Path::new(&home).join("git"))
}

pub fn ensure_absent(target: &Path) -> Result<()> {
    if target.exists() {
        bail!("{} already exists", target.display());
    }
    Ok(())
}

/// `mkdir -p` for the directory that will hold the clone.
pub fn create_parent(target: &Path, dry_run: bool) -> Result<()> {
    let Some(parent) = target.parent() else {
        return Ok(());
    };
    if dry_run {
        info!("Would create {}", parent.display());
        return Ok(());
    }
    debug!("Creating {}", parent.display());
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))
}

pub fn clone(uri: &str, target: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        info!("Would run: git clone {} {}", uri, target.display());
        return Ok(());
    }

    info!("Running: git clone {} {}", uri, target.display());
    let status = Command::new("git")
        .arg("clone")
        .arg(uri)
        .arg(target)
        .status()
        .context("Failed to run git")?;
    if !status.success() {
        bail!("git clone exited with {}", status);
    }
    Ok(())
}

/// Clones `uri` below `location` and returns where it ended up.
pub fn get(uri: &str, location: &Path, dry_run: bool) -> Result<PathBuf> {
    let repo = RepoLocation::parse(uri)?;
    let target = repo.target_path(location);
    debug!("{} resolves to {}", uri, target.display());

    ensure_absent(&target)?;
    create_parent(&target, dry_run)?;
    clone(uri, &target, dry_run)?;
    Ok(target)
}
