//! Version report assembly.
//!
//! [`Reporter`] runs the four top-level lookups (server, client, security
//! packages, plugin packages) concurrently against an already loaded
//! [`Manifest`] and returns the finished [`VersionReport`].
//!
//! # Example
//!
//! ```no_run
//! use wiki_versions::{report::generate, Config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let report = generate(&std::env::current_dir()?, &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

use crate::collector::Category;
use crate::config::Config;
use crate::error::ManifestError;
use crate::manifest::ManifestLoader;
use crate::model::{Manifest, VersionReport};
use crate::registry::{NodeModulesRegistry, PackageRegistry};
use crate::resolver::VersionResolver;
use std::path::Path;
use tracing::info;

pub struct Reporter<R> {
    resolver: VersionResolver<R>,
    server_package: String,
    client_package: String,
    security: Category,
    plugins: Category,
}

impl<R: PackageRegistry> Reporter<R> {
    pub fn new(resolver: VersionResolver<R>, config: &Config) -> Self {
        Self {
            resolver,
            server_package: config.server_package.clone(),
            client_package: config.client_package.clone(),
            security: config.security_category(),
            plugins: config.plugin_category(),
        }
    }

    /// Builds the report for `manifest`.
    ///
    /// Returns only after every lookup has either succeeded or degraded to
    /// `"unknown"`.
    pub async fn report(&self, manifest: &Manifest) -> VersionReport {
        let (server, client, security, plugins) = tokio::join!(
            self.resolver.resolve(&self.server_package),
            self.resolver.resolve(&self.client_package),
            self.security.collect(manifest, &self.resolver),
            self.plugins.collect(manifest, &self.resolver),
        );

        let report = VersionReport::new(manifest, server, client, security, plugins);
        info!(
            "Resolved {} packages ({} unknown)",
            report.entries().len(),
            report.unknown_count()
        );
        report
    }
}

/// Loads the manifest for `start` and builds its report from `node_modules`.
///
/// # Errors
///
/// Returns an error only if no manifest can be found.
pub async fn generate(start: &Path, config: &Config) -> Result<VersionReport, ManifestError> {
    let manifest = ManifestLoader::for_start(start, &config.root_package).load().await?;

    let registry = NodeModulesRegistry::from_start(start);
    let resolver = VersionResolver::with_timeout(registry, config.lookup_timeout());

    Ok(Reporter::new(resolver, config).report(&manifest).await)
}
