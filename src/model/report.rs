use super::Manifest;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Version reported for a package whose installed version could not be read.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Report key for the security package section.
pub const SECURITY_KEY: &str = "security";

/// Report key for the plugin package section.
pub const PLUGINS_KEY: &str = "plugins";

/// Installed versions keyed by package name, in manifest declaration order.
pub type VersionMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub name: String,
    pub version: String,
}

impl ResolvedVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(name, UNKNOWN_VERSION)
    }

    pub fn is_unknown(&self) -> bool {
        self.version == UNKNOWN_VERSION
    }
}

/// The root application itself, as declared in its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPackage {
    pub name: String,
    /// `None` when the manifest declares no version; the root key is then
    /// left out of the serialized report.
    pub version: Option<String>,
}

/// The consolidated version report.
///
/// Serializes as a single JSON object with the keys
/// `{<root name>, <server>, <client>, security, plugins}` in that order.
/// A key that occurs twice keeps its first position and takes the value of
/// its last occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReport {
    pub root: RootPackage,
    pub server: ResolvedVersion,
    pub client: ResolvedVersion,
    pub security: VersionMap,
    pub plugins: VersionMap,
}

impl VersionReport {
    pub fn new(
        manifest: &Manifest,
        server: ResolvedVersion,
        client: ResolvedVersion,
        security: VersionMap,
        plugins: VersionMap,
    ) -> Self {
        Self {
            root: RootPackage {
                name: manifest.name.clone(),
                version: manifest.version.clone(),
            },
            server,
            client,
            security,
            plugins,
        }
    }

    /// Every versioned package in the report, flattened, in output order.
    pub fn entries(&self) -> Vec<ResolvedVersion> {
        let mut entries = Vec::new();
        if let Some(version) = &self.root.version {
            entries.push(ResolvedVersion::new(&self.root.name, version));
        }
        entries.push(self.server.clone());
        entries.push(self.client.clone());
        for (name, version) in self.security.iter().chain(self.plugins.iter()) {
            entries.push(ResolvedVersion::new(name, version));
        }
        entries
    }

    /// Number of entries that degraded to [`UNKNOWN_VERSION`].
    pub fn unknown_count(&self) -> usize {
        self.entries().iter().filter(|e| e.is_unknown()).count()
    }
}

enum Field<'a> {
    Version(&'a str),
    Section(&'a VersionMap),
}

impl Serialize for Field<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Version(version) => serializer.serialize_str(version),
            Field::Section(section) => section.serialize(serializer),
        }
    }
}

impl Serialize for VersionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = [
            (self.root.name.as_str(), self.root.version.as_deref().map(Field::Version)),
            (self.server.name.as_str(), Some(Field::Version(&self.server.version))),
            (self.client.name.as_str(), Some(Field::Version(&self.client.version))),
            (SECURITY_KEY, Some(Field::Section(&self.security))),
            (PLUGINS_KEY, Some(Field::Section(&self.plugins))),
        ];

        let mut emitted = Vec::with_capacity(fields.len());
        for (i, (key, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(earlier, _)| earlier == key) {
                continue;
            }
            let last = fields.iter().rev().find(|(other, _)| other == key);
            if let Some((_, Some(value))) = last {
                emitted.push((*key, value));
            }
        }

        let mut map = serializer.serialize_map(Some(emitted.len()))?;
        for (key, value) in emitted {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
