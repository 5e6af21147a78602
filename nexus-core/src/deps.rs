//! Best-effort dependency installation for freshly installed plugins

use std::path::Path;
use std::process::Command;

use crate::error::PluginError;

/// Install a plugin's declared dependencies by running `npm install` in its
/// directory.
///
/// Skips silently when the plugin ships no `package.json`. Callers treat a
/// returned error as non-fatal: installation proceeds regardless, the
/// failure is only logged.
pub fn install_dependencies(plugin_dir: &Path) -> Result<(), PluginError> {
    if !plugin_dir.join("package.json").exists() {
        tracing::debug!(dir = %plugin_dir.display(), "No package.json, skipping dependency install");
        return Ok(());
    }

    let npm = which::which("npm").map_err(|e| PluginError::DependencyInstall {
        reason: format!("npm not found: {e}"),
    })?;

    tracing::info!(dir = %plugin_dir.display(), "Installing plugin dependencies");
    let status = Command::new(npm)
        .arg("install")
        .current_dir(plugin_dir)
        .status()
        .map_err(|e| PluginError::DependencyInstall {
            reason: format!("failed to run npm install: {e}"),
        })?;

    if !status.success() {
        return Err(PluginError::DependencyInstall {
            reason: format!("npm install exited with {status}"),
        });
    }
    Ok(())
}
