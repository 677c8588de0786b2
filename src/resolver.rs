use crate::error::LookupError;
use crate::model::ResolvedVersion;
use crate::registry::PackageRegistry;
use std::time::Duration;
use tracing::warn;

/// Default bound on a single package lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves installed versions, degrading every failure to `"unknown"`.
///
/// Lookups share nothing but a read-only registry, so any number of
/// [`resolve`](Self::resolve) calls may be in flight at once.
pub struct VersionResolver<R> {
    registry: R,
    timeout: Duration,
}

impl<R: PackageRegistry> VersionResolver<R> {
    pub fn new(registry: R) -> Self {
        Self::with_timeout(registry, DEFAULT_LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(registry: R, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Resolves the installed version of `package`.
    ///
    /// Never fails: a lookup error or timeout is logged and reported as
    /// [`UNKNOWN_VERSION`](crate::model::UNKNOWN_VERSION).
    pub async fn resolve(&self, package: &str) -> ResolvedVersion {
        match self.try_resolve(package).await {
            Ok(version) => ResolvedVersion::new(package, version),
            Err(e) => {
                warn!(package, registry = self.registry.name(), "Error reading package for {}: {}", package, e);
                ResolvedVersion::unknown(package)
            }
        }
    }

    async fn try_resolve(&self, package: &str) -> Result<String, LookupError> {
        tokio::time::timeout(self.timeout, self.registry.installed_version(package))
            .await
            .map_err(|_| LookupError::TimedOut(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::instrument::WithSubscriber;

    struct FixedRegistry(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl PackageRegistry for FixedRegistry {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn installed_version(&self, package: &str) -> Result<String, LookupError> {
            self.0
                .get(package)
                .map(|v| v.to_string())
                .ok_or(LookupError::NotInstalled)
        }
    }

    struct HangingRegistry;

    #[async_trait]
    impl PackageRegistry for HangingRegistry {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn installed_version(&self, _package: &str) -> Result<String, LookupError> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_resolve_installed() {
        let resolver = VersionResolver::new(FixedRegistry(HashMap::from([("wiki-server", "2.0.3")])));
        assert_eq!(
            resolver.resolve("wiki-server").await,
            ResolvedVersion::new("wiki-server", "2.0.3")
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_is_unknown() {
        let resolver = VersionResolver::new(FixedRegistry(HashMap::new()));
        let resolved = resolver.resolve("wiki-client").await;

        assert_eq!(resolved.name, "wiki-client");
        assert_eq!(resolved.version, "unknown");
        assert!(resolved.is_unknown());
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_resolve_failure_logs_warning_with_package_and_cause() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let resolver = VersionResolver::new(FixedRegistry(HashMap::new()));
        let resolved = resolver.resolve("wiki-client").with_subscriber(subscriber).await;

        assert!(resolved.is_unknown());
        let output = log.contents();
        assert!(output.contains("WARN"), "{}", output);
        assert!(
            output.contains("Error reading package for wiki-client: Package not installed"),
            "{}",
            output
        );
        assert!(output.contains("registry=\"fixed\""), "{}", output);
    }

    #[tokio::test]
    async fn test_resolve_success_logs_nothing() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let resolver = VersionResolver::new(FixedRegistry(HashMap::from([("wiki-server", "2.0.3")])));
        resolver.resolve("wiki-server").with_subscriber(subscriber).await;

        assert!(log.contents().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_timeout_is_unknown() {
        let resolver = VersionResolver::with_timeout(HangingRegistry, Duration::from_secs(5));
        assert!(resolver.resolve("wiki-plugin-slow").await.is_unknown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_resolve_reports_timeout() {
        let resolver = VersionResolver::with_timeout(HangingRegistry, Duration::from_millis(250));
        assert!(matches!(
            resolver.try_resolve("wiki-plugin-slow").await,
            Err(LookupError::TimedOut(d)) if d == Duration::from_millis(250)
        ));
    }
}
