//! Core data types for manifests and version reports.
//!
//! This module contains the fundamental types used throughout wiki-versions:
//!
//! - [`Manifest`] - The root application's `package.json`
//! - [`PackageFragment`] - The `name`/`version` subset of an installed package
//! - [`ResolvedVersion`] - One package name paired with its installed version
//! - [`VersionReport`] - The consolidated report printed by the CLI
//!
//! # Example
//!
//! ```
//! use wiki_versions::model::{Manifest, ResolvedVersion, VersionReport};
//!
//! let manifest = Manifest::new("wiki", "1.2.0");
//! let report = VersionReport::new(
//!     &manifest,
//!     ResolvedVersion::new("wiki-server", "2.0.3"),
//!     ResolvedVersion::unknown("wiki-client"),
//!     Default::default(),
//!     Default::default(),
//! );
//!
//! assert_eq!(report.root.version.as_deref(), Some("1.2.0"));
//! ```

mod manifest;
mod report;

pub use manifest::*;
pub use report::*;
