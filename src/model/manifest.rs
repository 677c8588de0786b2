use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The root application's `package.json`.
///
/// Only the fields the report needs are kept. Dependencies keep the order in
/// which they are declared in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

impl Manifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            dependencies: IndexMap::new(),
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), constraint.into());
        self
    }

    /// Dependency names starting with `prefix`, in declaration order.
    ///
    /// Matching is case-sensitive and literal.
    pub fn dependencies_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.dependencies
            .keys()
            .map(String::as_str)
            .filter(move |name| name.starts_with(prefix))
    }
}

/// The part of an installed package's `package.json` used for version lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageFragment {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parses_package_json() {
        let json = r#"{
            "name": "wiki",
            "version": "1.2.0",
            "description": "Federated Wiki",
            "dependencies": {
                "wiki-server": "^2.0.0",
                "wiki-plugin-foo": "^1.0.0",
                "lodash": "^4.0.0"
            }
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();

        assert_eq!(manifest.name, "wiki");
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
        let names: Vec<_> = manifest.dependencies.keys().collect();
        assert_eq!(names, ["wiki-server", "wiki-plugin-foo", "lodash"]);
    }

    #[test]
    fn test_manifest_without_dependencies() {
        let manifest: Manifest = serde_json::from_str(r#"{"name": "wiki", "version": "0.1.0"}"#).unwrap();
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn test_manifest_requires_name() {
        assert!(serde_json::from_str::<Manifest>(r#"{"version": "1.0.0"}"#).is_err());
    }

    #[test]
    fn test_manifest_version_is_optional() {
        let manifest: Manifest = serde_json::from_str(r#"{"name": "wiki"}"#).unwrap();
        assert_eq!(manifest.name, "wiki");
        assert!(manifest.version.is_none());
    }

    #[test]
    fn test_dependencies_with_prefix() {
        let manifest = Manifest::new("wiki", "1.0.0")
            .with_dependency("wiki-plugin-b", "*")
            .with_dependency("wiki-security-passportjs", "*")
            .with_dependency("Wiki-plugin-upper", "*")
            .with_dependency("wiki-plugin-a", "*")
            .with_dependency("my-wiki-plugin", "*");

        let plugins: Vec<_> = manifest.dependencies_with_prefix("wiki-plugin").collect();
        assert_eq!(plugins, ["wiki-plugin-b", "wiki-plugin-a"]);

        let security: Vec<_> = manifest.dependencies_with_prefix("wiki-security").collect();
        assert_eq!(security, ["wiki-security-passportjs"]);
    }

    #[test]
    fn test_fragment_tolerates_missing_fields() {
        let fragment: PackageFragment = serde_json::from_str(r#"{"main": "index.js"}"#).unwrap();
        assert!(fragment.name.is_none());
        assert!(fragment.version.is_none());
    }
}
