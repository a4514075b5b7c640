//! Utility source lookup.
//!
//! The registry is the set of `<name>.ts` files under `registry/` in the
//! youtools repository. A build resolves them either from a local copy or
//! from the published repository; `default_resolver` picks one at compile
//! time via the `local-registry` feature.

use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::utils::io;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

/// Directory holding utility sources, relative to the repository root.
pub const REGISTRY_SUBPATH: &str = "registry";
/// Branch the remote registry is read from.
pub const REGISTRY_BRANCH: &str = "main";
/// Extension of utility sources in the registry.
pub const SOURCE_EXTENSION: &str = "ts";

pub const REGISTRY_URL_ENV: &str = "YOUTOOLS_REGISTRY_URL";
pub const REGISTRY_DIR_ENV: &str = "YOUTOOLS_REGISTRY_DIR";

pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce the source text of a named utility.
pub trait SourceResolver {
    fn resolve(&self, name: &str) -> Result<String>;
}

/// Reads utilities from a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$YOUTOOLS_REGISTRY_DIR`, or the `registry/` directory this build
    /// was compiled from.
    pub fn from_env() -> Self {
        match std::env::var(REGISTRY_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join(REGISTRY_SUBPATH)),
        }
    }

    pub fn source_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, SOURCE_EXTENSION))
    }
}

impl SourceResolver for LocalRegistry {
    fn resolve(&self, name: &str) -> Result<String> {
        let path = self.source_path(name);
        if !path.is_file() {
            return Err(Error::registry_not_found(
                name,
                path.display().to_string(),
                None,
            ));
        }
        io::read_file(&path, "read registry source")
    }
}

/// Fetches utilities over HTTP from the published repository.
pub struct RemoteRegistry {
    client: Client,
    base_url: String,
}

impl RemoteRegistry {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("youtools/{}", VERSION))
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::internal_io(e.to_string(), Some("create HTTP client".to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `$YOUTOOLS_REGISTRY_URL`, or the URL derived from the package repository.
    pub fn from_env() -> Result<Self> {
        match std::env::var(REGISTRY_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(registry_base_url(REPOSITORY)),
        }
    }

    pub fn utility_url(&self, name: &str) -> String {
        format!("{}/{}.{}", self.base_url, name, SOURCE_EXTENSION)
    }
}

impl SourceResolver for RemoteRegistry {
    fn resolve(&self, name: &str) -> Result<String> {
        let url = self.utility_url(name);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::registry_request_failed(url.clone(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::registry_not_found(name, url, Some(status.as_u16())));
        }

        response
            .text()
            .map_err(|e| Error::registry_request_failed(url, e.to_string()))
    }
}

/// Raw-content base URL for a GitHub repository URL.
///
/// `https://github.com/owner/repo.git` becomes
/// `https://raw.githubusercontent.com/owner/repo/main/registry`.
pub fn registry_base_url(repository: &str) -> String {
    let repo = repository.trim().trim_end_matches('/');
    let repo = repo.strip_prefix("git+").unwrap_or(repo);
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    let raw = repo.replacen("github.com", "raw.githubusercontent.com", 1);

    format!("{}/{}/{}", raw, REGISTRY_BRANCH, REGISTRY_SUBPATH)
}

#[cfg(not(feature = "local-registry"))]
pub fn default_resolver() -> Result<Box<dyn SourceResolver>> {
    Ok(Box::new(RemoteRegistry::from_env()?))
}

#[cfg(feature = "local-registry")]
pub fn default_resolver() -> Result<Box<dyn SourceResolver>> {
    Ok(Box::new(LocalRegistry::from_env()))
}
