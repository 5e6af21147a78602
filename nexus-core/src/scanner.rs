//! Plugin scanner - walks the plugins root and produces a fresh manifest

use std::path::Path;

use crate::descriptor::{DESCRIPTOR_FILE, ENTRY_FILE, PluginDescriptor};
use crate::error::PluginError;
use crate::manifest::{Manifest, ManifestEntry};

/// Scan the plugins root and build a manifest from what actually exists.
///
/// A directory is a valid candidate iff it contains a parseable
/// `plugin.json` and an `index.js`. Invalid candidates are logged and
/// skipped; nothing short of an unreadable root aborts the scan. A missing
/// root is created empty. Entries are sorted by id so the manifest is
/// deterministic across platforms.
pub fn scan(plugins_dir: &Path) -> Result<Manifest, PluginError> {
    tracing::debug!(dir = %plugins_dir.display(), "Scanning plugins directory");

    if !plugins_dir.exists() {
        std::fs::create_dir_all(plugins_dir)?;
        return Ok(Manifest::new(Vec::new()));
    }

    let mut entries = Vec::new();

    for dir_entry in std::fs::read_dir(plugins_dir)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Dot-directories are never plugins; staging and swap leftovers
        // live under dot-prefixed names.
        if name.starts_with('.') {
            continue;
        }

        let descriptor_path = path.join(DESCRIPTOR_FILE);
        if !descriptor_path.exists() {
            tracing::debug!(plugin = %name, "No plugin.json, skipping");
            continue;
        }

        let descriptor = match std::fs::read_to_string(&descriptor_path)
            .map_err(PluginError::from)
            .and_then(|content| PluginDescriptor::parse(&content, &descriptor_path))
        {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(plugin = %name, error = %e, "Error reading plugin, skipping");
                continue;
            }
        };

        if !path.join(ENTRY_FILE).exists() {
            tracing::debug!(plugin = %name, "No entry file, skipping");
            continue;
        }

        tracing::info!(plugin = %descriptor.name, id = %name, "Found plugin");
        entries.push(ManifestEntry::from_descriptor(name, &descriptor));
    }

    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(Manifest::new(entries))
}

/// Ids of every plugin directory under the root, valid or not.
///
/// Used for not-found diagnostics so the operator sees what is actually
/// installed, even bundles the scanner would reject.
pub fn installed_ids(plugins_dir: &Path) -> Vec<String> {
    let Ok(read_dir) = std::fs::read_dir(plugins_dir) else {
        return Vec::new();
    };

    let mut ids: Vec<String> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();
    ids.sort();
    ids
}
