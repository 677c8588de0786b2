use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package {0} is not installed on the search path")]
    NotInstalled(String),

    #[error("No manifest found (tried: {})", .attempts.join("; "))]
    NotFound { attempts: Vec<String> },
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid package name: {0:?}")]
    InvalidName(String),

    #[error("Package not installed")]
    NotInstalled,

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No version field in {0:?}")]
    MissingVersion(PathBuf),

    #[error("Lookup timed out after {0:?}")]
    TimedOut(Duration),
}
