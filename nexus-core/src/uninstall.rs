//! Uninstaller - remove an installed plugin and refresh the manifest

use crate::config::PluginPaths;
use crate::descriptor::PluginDescriptor;
use crate::error::PluginError;
use crate::manifest::ManifestStore;
use crate::scanner;

/// Result of an uninstall attempt that found the plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum UninstallOutcome {
    /// Directory removed, manifest rewritten
    Removed,
    /// Confirmation callback declined; nothing was touched
    Declined,
}

/// Remove the plugin directory for `id`, then rescan and persist the
/// manifest.
///
/// `confirm` receives a human-readable label ("Wiki v2.0.0" when the
/// descriptor parses, the bare id otherwise) and gates the removal; callers
/// with a `--force` flag pass `|_| true`. A false return aborts cleanly with
/// zero filesystem mutation. Fails with `NotFound` (carrying the installed
/// ids for diagnostics) when no directory exists for `id`.
pub fn uninstall<F>(
    id: &str,
    paths: &PluginPaths,
    confirm: F,
) -> Result<UninstallOutcome, PluginError>
where
    F: FnOnce(&str) -> bool,
{
    let plugin_dir = paths.plugin_dir(id);
    if !plugin_dir.exists() {
        return Err(PluginError::NotFound {
            id: id.to_string(),
            available: scanner::installed_ids(&paths.plugins_dir),
        });
    }

    let label = match PluginDescriptor::read_from_dir(&plugin_dir) {
        Ok(descriptor) => format!("{} v{}", descriptor.name, descriptor.version),
        Err(_) => id.to_string(),
    };

    if !confirm(&label) {
        tracing::info!(plugin = %id, "Uninstall declined");
        return Ok(UninstallOutcome::Declined);
    }

    tracing::info!(plugin = %id, "Uninstalling {label}");
    std::fs::remove_dir_all(&plugin_dir)?;

    let manifest = scanner::scan(&paths.plugins_dir)?;
    ManifestStore::save(&paths.manifest_path, &manifest)?;

    tracing::info!(plugin = %id, "Plugin uninstalled");
    Ok(UninstallOutcome::Removed)
}
