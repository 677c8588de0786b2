pub mod collector;
pub mod config;
pub mod error;
pub mod manifest;
pub mod model;
pub mod output;
pub mod platform;
pub mod registry;
pub mod report;
pub mod resolver;

pub use collector::Category;
pub use config::Config;
pub use error::{LookupError, ManifestError};
pub use model::{Manifest, ResolvedVersion, VersionReport, UNKNOWN_VERSION};
pub use registry::{NodeModulesRegistry, PackageRegistry};
pub use report::Reporter;
pub use resolver::VersionResolver;
