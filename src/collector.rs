//! Prefix-based package categories.
//!
//! A [`Category`] selects the manifest dependencies whose names start with a
//! fixed prefix, e.g. every `wiki-plugin*` package, and resolves them all.

use crate::model::{Manifest, VersionMap};
use crate::registry::PackageRegistry;
use crate::resolver::VersionResolver;
use futures::future::join_all;

pub const SECURITY_PREFIX: &str = "wiki-security";
pub const PLUGIN_PREFIX: &str = "wiki-plugin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub prefix: String,
}

impl Category {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn security() -> Self {
        Self::new(SECURITY_PREFIX)
    }

    pub fn plugins() -> Self {
        Self::new(PLUGIN_PREFIX)
    }

    /// Resolves every dependency in this category concurrently.
    ///
    /// Returns once all lookups have settled. Entries keep the manifest's
    /// declaration order; an empty map means nothing matched.
    pub async fn collect<R: PackageRegistry>(
        &self,
        manifest: &Manifest,
        resolver: &VersionResolver<R>,
    ) -> VersionMap {
        let lookups = manifest
            .dependencies_with_prefix(&self.prefix)
            .map(|name| resolver.resolve(name));

        join_all(lookups)
            .await
            .into_iter()
            .map(|resolved| (resolved.name, resolved.version))
            .collect()
    }
}
