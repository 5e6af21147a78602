//! `nexus manifest-generate` - rescan and rewrite the plugin manifest

use anyhow::Result;
use nexus_core::{ManifestStore, PluginPaths, scanner};

/// Run the manifest-generate command.
///
/// Per-plugin errors are logged by the scanner and never fail the command;
/// only an unwritable manifest or an unreadable plugins root does.
pub fn run() -> Result<()> {
    let paths = PluginPaths::default();

    println!("Scanning plugins directory...");
    let manifest = scanner::scan(&paths.plugins_dir)?;
    ManifestStore::save(&paths.manifest_path, &manifest)?;

    println!("Manifest generated with {} plugins", manifest.count);
    println!("Location: {}", paths.manifest_path.display());
    Ok(())
}
