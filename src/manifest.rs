//! Root manifest loading.
//!
//! The root `package.json` is found by trying a list of [`ManifestLocator`]s
//! in order. The first that produces a manifest wins.
//!
//! The default order supports running both from an installation that has the
//! wiki package in `node_modules` and from inside the wiki project itself:
//!
//! 1. [`InstalledPackageLocator`] - `node_modules/wiki/package.json` on the
//!    Node lookup path
//! 2. [`WorkingDirectoryLocator`] - `./package.json`

use crate::error::ManifestError;
use crate::model::Manifest;
use crate::registry::NodeModulesRegistry;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// One way of finding the root manifest.
#[async_trait]
pub trait ManifestLocator: Send + Sync {
    /// Returns a short description used in diagnostics.
    fn name(&self) -> &'static str;

    /// Finds and parses the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if this locator cannot produce a manifest.
    async fn locate(&self) -> Result<Manifest, ManifestError>;
}

/// Reads the `package.json` of an installed package.
pub struct InstalledPackageLocator {
    package: String,
    registry: NodeModulesRegistry,
}

impl InstalledPackageLocator {
    pub fn new(package: impl Into<String>, registry: NodeModulesRegistry) -> Self {
        Self {
            package: package.into(),
            registry,
        }
    }
}

#[async_trait]
impl ManifestLocator for InstalledPackageLocator {
    fn name(&self) -> &'static str {
        "installed package"
    }

    async fn locate(&self) -> Result<Manifest, ManifestError> {
        let path = self.registry.locate(&self.package).await.map_err(|e| {
            debug!("{} not found on the search path: {}", self.package, e);
            ManifestError::NotInstalled(self.package.clone())
        })?;
        read_manifest(&path).await
    }
}

/// Reads `package.json` from a fixed directory.
pub struct WorkingDirectoryLocator {
    dir: PathBuf,
}

impl WorkingDirectoryLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ManifestLocator for WorkingDirectoryLocator {
    fn name(&self) -> &'static str {
        "working directory"
    }

    async fn locate(&self) -> Result<Manifest, ManifestError> {
        read_manifest(&self.dir.join("package.json")).await
    }
}

/// Tries locators in priority order, stopping at the first success.
pub struct ManifestLoader {
    locators: Vec<Box<dyn ManifestLocator>>,
}

impl ManifestLoader {
    pub fn new(locators: Vec<Box<dyn ManifestLocator>>) -> Self {
        Self { locators }
    }

    /// The default strategy list for a run started in `start`.
    pub fn for_start(start: &Path, root_package: &str) -> Self {
        Self::new(vec![
            Box::new(InstalledPackageLocator::new(
                root_package,
                NodeModulesRegistry::from_start(start),
            )),
            Box::new(WorkingDirectoryLocator::new(start)),
        ])
    }

    /// Loads the manifest.
    ///
    /// Failures of all but the last locator are only logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] listing every attempt if no
    /// locator succeeds.
    pub async fn load(&self) -> Result<Manifest, ManifestError> {
        let mut attempts = Vec::with_capacity(self.locators.len());

        for (i, locator) in self.locators.iter().enumerate() {
            match locator.locate().await {
                Ok(manifest) => {
                    debug!("Loaded manifest {} {:?} via {}", manifest.name, manifest.version, locator.name());
                    return Ok(manifest);
                }
                Err(e) => {
                    if i + 1 == self.locators.len() {
                        error!("problems importing package via {}: {}", locator.name(), e);
                    } else {
                        debug!("Manifest not available via {}: {}", locator.name(), e);
                    }
                    attempts.push(format!("{}: {}", locator.name(), e));
                }
            }
        }

        Err(ManifestError::NotFound { attempts })
    }
}

async fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
