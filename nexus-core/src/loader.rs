//! Plugin loader - populate the runtime registry from the manifest
//!
//! This is the sole path by which persisted state enters the registry. The
//! manifest is read once at startup; toggles afterwards live only in the
//! registry until the process exits.

use std::path::Path;

use crate::component::ComponentTable;
use crate::config::PluginPaths;
use crate::error::PluginError;
use crate::manifest::{Manifest, ManifestStore};
use crate::registry::{PluginRegistry, RegistryEntry};

/// Counts from a startup load pass.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub failed: usize,
}

/// Register every resolvable manifest entry into the registry, in manifest
/// order.
///
/// An entry resolves when its recorded entry path exists under
/// `resolution_root` and the component table holds a factory for its id.
/// Failures are logged and skipped - one bad plugin never blocks the rest.
pub fn load(
    manifest: &Manifest,
    table: &ComponentTable,
    registry: &mut PluginRegistry,
    resolution_root: &Path,
) -> LoadReport {
    tracing::info!(count = manifest.count, "Loading plugins from manifest");
    let mut report = LoadReport::default();

    for entry in &manifest.plugins {
        let entry_file = resolution_root.join(&entry.path);
        if !entry_file.exists() {
            tracing::error!(
                plugin = %entry.id,
                path = %entry_file.display(),
                "Entry file missing, skipping"
            );
            report.failed += 1;
            continue;
        }

        let Some(component) = table.resolve(&entry.id) else {
            tracing::error!(plugin = %entry.id, "No component registered, skipping");
            report.failed += 1;
            continue;
        };

        registry.register(RegistryEntry::new(entry.clone(), component));
        report.loaded += 1;
    }

    tracing::info!(loaded = report.loaded, failed = report.failed, "Plugin load finished");
    report
}

/// Startup convenience: read the manifest from disk and load it.
pub fn load_from_disk(
    paths: &PluginPaths,
    table: &ComponentTable,
    registry: &mut PluginRegistry,
) -> Result<LoadReport, PluginError> {
    let manifest = ManifestStore::load(&paths.manifest_path)?;
    Ok(load(&manifest, table, registry, paths.resolution_root()))
}
