//! Installed package lookup.
//!
//! This module provides the [`PackageRegistry`] trait and the
//! [`NodeModulesRegistry`] implementation, which reads an installed
//! package's own `package.json` from a `node_modules` tree.
//!
//! # Example
//!
//! ```no_run
//! use wiki_versions::registry::{NodeModulesRegistry, PackageRegistry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = NodeModulesRegistry::from_start(&std::env::current_dir()?);
//!     let version = registry.installed_version("wiki-server").await?;
//!     println!("wiki-server {}", version);
//!     Ok(())
//! }
//! ```

use crate::error::LookupError;
use crate::model::PackageFragment;
use crate::platform::node_modules_dirs;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of installed package versions.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Returns the human-readable name of this registry.
    fn name(&self) -> &'static str;

    /// Returns the installed version of `package`.
    ///
    /// # Errors
    ///
    /// Returns an error if the package is not installed or its metadata
    /// cannot be read.
    async fn installed_version(&self, package: &str) -> Result<String, LookupError>;
}

/// Looks packages up in `node_modules` directories, nearest first.
#[derive(Debug, Clone)]
pub struct NodeModulesRegistry {
    search_dirs: Vec<PathBuf>,
}

impl NodeModulesRegistry {
    /// Searches the Node lookup path for `start`, then `NODE_PATH`.
    pub fn from_start(start: &Path) -> Self {
        Self::with_search_dirs(node_modules_dirs(start))
    }

    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Finds the `package.json` of an installed package.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidName`] for names that are not valid
    /// package names and [`LookupError::NotInstalled`] when no search
    /// directory contains the package.
    pub async fn locate(&self, package: &str) -> Result<PathBuf, LookupError> {
        let segments = package_segments(package)?;

        for dir in &self.search_dirs {
            let path = segments
                .iter()
                .fold(dir.clone(), |path, segment| path.join(segment))
                .join("package.json");

            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Ok(path);
            }
        }

        Err(LookupError::NotInstalled)
    }
}

#[async_trait]
impl PackageRegistry for NodeModulesRegistry {
    fn name(&self) -> &'static str {
        "node_modules"
    }

    async fn installed_version(&self, package: &str) -> Result<String, LookupError> {
        let path = self.locate(package).await?;
        let fragment = read_fragment(&path).await?;

        let version = fragment
            .version
            .ok_or_else(|| LookupError::MissingVersion(path.clone()))?;

        if semver::Version::parse(&version).is_err() {
            debug!("{} has a non-semver version {:?} in {:?}", package, version, path);
        }

        Ok(version)
    }
}

/// Reads the `name`/`version` fragment of a `package.json`.
pub async fn read_fragment(path: &Path) -> Result<PackageFragment, LookupError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LookupError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| LookupError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits a package name into its directory segments.
///
/// Accepts `name` and `@scope/name`. Anything that could escape the
/// `node_modules` directory is rejected.
fn package_segments(package: &str) -> Result<Vec<&str>, LookupError> {
    let invalid = || LookupError::InvalidName(package.to_string());

    let segments: Vec<&str> = package.split('/').collect();
    let expected = if package.starts_with('@') { 2 } else { 1 };

    if segments.len() != expected {
        return Err(invalid());
    }

    for segment in &segments {
        if segment.is_empty() || *segment == "." || *segment == ".." || segment.contains('\\') {
            return Err(invalid());
        }
    }

    if segments.len() == 2 && segments[0] == "@" {
        return Err(invalid());
    }

    Ok(segments)
}
