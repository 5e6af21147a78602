//! Persisted plugin manifest - the aggregated descriptor list
//!
//! The manifest is the sole source of truth the loader consults at startup.
//! It is always rewritten wholesale after a rescan, never patched in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::descriptor::{ENTRY_FILE, PluginDescriptor};
use crate::error::PluginError;

/// A single manifest entry: descriptor fields plus the resolved entry path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    /// Plugin id, always the directory name under the plugins root
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub enabled: bool,
    pub icon: String,
    pub zone: String,
    /// Entry path relative to the loader's resolution root
    pub path: String,
}

impl ManifestEntry {
    /// Build an entry from a parsed descriptor and the directory name it
    /// lives under. The directory name wins as the id; the descriptor's own
    /// `id` field only matters when the installer derives the directory name.
    pub fn from_descriptor(dir_name: &str, descriptor: &PluginDescriptor) -> Self {
        Self {
            id: dir_name.to_string(),
            name: if descriptor.name.is_empty() {
                dir_name.to_string()
            } else {
                descriptor.name.clone()
            },
            version: descriptor.version.clone(),
            description: descriptor.description.clone(),
            author: descriptor.author.clone(),
            enabled: descriptor.enabled,
            icon: descriptor.icon.clone(),
            zone: descriptor.zone.clone(),
            path: entry_path_for(dir_name),
        }
    }
}

/// Entry path recorded in the manifest for a plugin id, relative to the
/// resolution root (the directory holding the plugins root).
pub fn entry_path_for(id: &str) -> String {
    format!("plugins/{id}/{ENTRY_FILE}")
}

/// The persisted manifest: generation timestamp, count, ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// When this manifest was generated
    pub generated: DateTime<Utc>,
    /// Always equals `plugins.len()`
    pub count: usize,
    pub plugins: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest from entries, stamping the current time and count.
    pub fn new(plugins: Vec<ManifestEntry>) -> Self {
        Self {
            generated: Utc::now(),
            count: plugins.len(),
            plugins,
        }
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.plugins.iter().find(|p| p.id == id)
    }
}

/// Reads and writes the persisted manifest file.
///
/// Saves are full overwrites. Concurrent saves are not synchronized; the
/// last writer wins. Pipeline invocations are assumed to be serialized
/// externally.
pub struct ManifestStore;

impl ManifestStore {
    /// Load the manifest from `path`.
    pub fn load(path: &Path) -> Result<Manifest, PluginError> {
        if !path.exists() {
            return Err(PluginError::ManifestMissing {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| PluginError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist `manifest` to `path`, creating parent directories as needed.
    ///
    /// The count field is recomputed before writing so the on-disk invariant
    /// `count == plugins.len()` holds regardless of caller bookkeeping.
    pub fn save(path: &Path, manifest: &Manifest) -> Result<(), PluginError> {
        let mut manifest = manifest.clone();
        manifest.count = manifest.plugins.len();

        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&manifest).map_err(|source| {
            PluginError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entry(id: &str) -> ManifestEntry {
        ManifestEntry {
            id: id.to_string(),
            name: id.to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
            author: String::new(),
            enabled: true,
            icon: "🔌".to_string(),
            zone: "main".to_string(),
            path: entry_path_for(id),
        }
    }

    #[test]
    fn test_new_sets_count() {
        let manifest = Manifest::new(vec![sample_entry("a"), sample_entry("b")]);
        assert_eq!(manifest.count, 2);
    }

    #[test]
    fn test_entry_path_format() {
        assert_eq!(entry_path_for("wiki-plugin"), "plugins/wiki-plugin/index.js");
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let result = ManifestStore::load(&dir.path().join("plugin-manifest.json"));
        assert!(matches!(result, Err(PluginError::ManifestMissing { .. })));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plugin-manifest.json");

        let manifest = Manifest::new(vec![sample_entry("wiki-plugin")]);
        ManifestStore::save(&path, &manifest).unwrap();

        let loaded = ManifestStore::load(&path).unwrap();
        assert_eq!(loaded.count, 1);
        assert_eq!(loaded.plugins, manifest.plugins);
    }

    #[test]
    fn test_save_recomputes_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plugin-manifest.json");

        let mut manifest = Manifest::new(vec![sample_entry("a")]);
        manifest.count = 99;
        ManifestStore::save(&path, &manifest).unwrap();

        let loaded = ManifestStore::load(&path).unwrap();
        assert_eq!(loaded.count, loaded.plugins.len());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/plugin-manifest.json");

        ManifestStore::save(&path, &Manifest::new(Vec::new())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_malformed_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plugin-manifest.json");
        std::fs::write(&path, "{broken").unwrap();

        let result = ManifestStore::load(&path);
        assert!(matches!(result, Err(PluginError::Parse { .. })));
    }

    #[test]
    fn test_from_descriptor_uses_dir_name_as_id() {
        let descriptor = PluginDescriptor::parse(
            r#"{"id": "other", "name": "Wiki", "version": "2.0.0"}"#,
            std::path::Path::new("plugin.json"),
        )
        .unwrap();
        let entry = ManifestEntry::from_descriptor("wiki-plugin", &descriptor);
        assert_eq!(entry.id, "wiki-plugin");
        assert_eq!(entry.name, "Wiki");
        assert_eq!(entry.version, "2.0.0");
        assert_eq!(entry.path, "plugins/wiki-plugin/index.js");
    }
}
