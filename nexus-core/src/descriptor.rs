//! Plugin descriptor - the `plugin.json` metadata file authored per plugin

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PluginError;

/// File name of the per-plugin descriptor.
pub const DESCRIPTOR_FILE: &str = "plugin.json";

/// File name of the loadable entry unit inside a plugin directory.
pub const ENTRY_FILE: &str = "index.js";

/// Plugin descriptor as authored in `plugin.json`.
///
/// Every field except `name` is optional in the file; absent fields take the
/// documented defaults so a minimal descriptor is just `{"name": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Explicit id; falls back to the directory name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable plugin name
    pub name: String,
    /// Semantic version string
    #[serde(default = "default_version")]
    pub version: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Plugin author
    #[serde(default)]
    pub author: String,
    /// Whether the plugin starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display glyph for the host surface
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Placement tag indicating where the plugin renders
    #[serde(default = "default_zone")]
    pub zone: String,
    /// License identifier, surfaced in the packed sidecar
    #[serde(default = "default_license")]
    pub license: String,
    /// Declared runtime dependencies (name -> version requirement)
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

pub(crate) fn default_version() -> String {
    "1.0.0".to_string()
}

pub(crate) fn default_enabled() -> bool {
    true
}

pub(crate) fn default_icon() -> String {
    "🔌".to_string()
}

pub(crate) fn default_zone() -> String {
    "main".to_string()
}

pub(crate) fn default_license() -> String {
    "MIT".to_string()
}

impl PluginDescriptor {
    /// Read and parse the descriptor inside a plugin directory.
    pub fn read_from_dir(plugin_dir: &Path) -> Result<Self, PluginError> {
        let path = plugin_dir.join(DESCRIPTOR_FILE);
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content, &path)
    }

    /// Parse descriptor JSON, attributing errors to `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PluginError> {
        serde_json::from_str(content).map_err(|source| PluginError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The id the descriptor declares: explicit `id` first, then `name`.
    pub fn declared_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_minimal_descriptor_defaults() {
        let d =
            PluginDescriptor::parse(r#"{"name": "Wiki"}"#, &PathBuf::from("plugin.json")).unwrap();
        assert_eq!(d.name, "Wiki");
        assert_eq!(d.version, "1.0.0");
        assert!(d.enabled);
        assert_eq!(d.icon, "🔌");
        assert_eq!(d.zone, "main");
        assert_eq!(d.license, "MIT");
        assert!(d.dependencies.is_empty());
        assert!(d.id.is_none());
    }

    #[test]
    fn test_declared_id_prefers_explicit_id() {
        let d = PluginDescriptor::parse(
            r#"{"id": "wiki-plugin", "name": "Wiki"}"#,
            &PathBuf::from("plugin.json"),
        )
        .unwrap();
        assert_eq!(d.declared_id(), "wiki-plugin");
    }

    #[test]
    fn test_declared_id_falls_back_to_name() {
        let d =
            PluginDescriptor::parse(r#"{"name": "Wiki"}"#, &PathBuf::from("plugin.json")).unwrap();
        assert_eq!(d.declared_id(), "Wiki");
    }

    #[test]
    fn test_enabled_false_round_trips() {
        let d = PluginDescriptor::parse(
            r#"{"name": "Wiki", "enabled": false}"#,
            &PathBuf::from("plugin.json"),
        )
        .unwrap();
        assert!(!d.enabled);
    }

    #[test]
    fn test_malformed_descriptor_is_parse_error() {
        let err = PluginDescriptor::parse("{not json", &PathBuf::from("/p/plugin.json"))
            .expect_err("should fail");
        assert!(matches!(err, PluginError::Parse { .. }));
        assert!(err.to_string().contains("/p/plugin.json"));
    }

    #[test]
    fn test_dependencies_parsed() {
        let d = PluginDescriptor::parse(
            r#"{"name": "Wiki", "dependencies": {"marked": "^4.0.0"}}"#,
            &PathBuf::from("plugin.json"),
        )
        .unwrap();
        assert_eq!(d.dependencies.get("marked").map(String::as_str), Some("^4.0.0"));
    }
}
