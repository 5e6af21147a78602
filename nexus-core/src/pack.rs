//! Packer - build distributable archives plus metadata sidecars

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::archive::{self, DEFAULT_EXCLUDES};
use crate::config::PluginPaths;
use crate::descriptor::{DESCRIPTOR_FILE, PluginDescriptor};
use crate::error::PluginError;
use crate::scanner;

/// Package info sidecar written next to each packed archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub dependencies: std::collections::BTreeMap<String, String>,
    /// Archive size in bytes after compression
    pub size: u64,
    /// File name of the produced archive
    pub package_file: String,
    pub install_instructions: String,
}

/// Outcome of packing a single plugin.
#[derive(Debug, Clone)]
pub struct PackedPlugin {
    pub id: String,
    pub version: String,
    pub archive_path: PathBuf,
    pub info_path: PathBuf,
    pub size: u64,
}

/// Summary of a `pack_all` batch run.
#[derive(Debug, Default)]
pub struct PackSummary {
    pub packed: Vec<String>,
    /// Per-plugin failures: (id, error message)
    pub failed: Vec<(String, String)>,
}

/// Pack one plugin into `<dist>/<id>-v<version>.zip` plus an
/// `<id>-info.json` sidecar.
///
/// Fails with `NotFound` when no directory exists for the id and with
/// `DescriptorMissing` when the directory carries no `plugin.json`.
pub fn pack(id: &str, paths: &PluginPaths) -> Result<PackedPlugin, PluginError> {
    let plugin_dir = paths.plugin_dir(id);
    if !plugin_dir.exists() {
        return Err(PluginError::NotFound {
            id: id.to_string(),
            available: scanner::installed_ids(&paths.plugins_dir),
        });
    }
    if !plugin_dir.join(DESCRIPTOR_FILE).exists() {
        return Err(PluginError::DescriptorMissing { id: id.to_string() });
    }

    let descriptor = PluginDescriptor::read_from_dir(&plugin_dir)?;
    tracing::info!(plugin = %id, version = %descriptor.version, "Packaging plugin");

    std::fs::create_dir_all(&paths.dist_dir)?;

    let zip_name = format!("{id}-v{}.zip", descriptor.version);
    let archive_path = paths.dist_dir.join(&zip_name);
    let size = archive::create(&plugin_dir, &archive_path, id, DEFAULT_EXCLUDES)?;

    let info = PackageInfo {
        id: id.to_string(),
        name: if descriptor.name.is_empty() {
            id.to_string()
        } else {
            descriptor.name.clone()
        },
        version: descriptor.version.clone(),
        description: descriptor.description.clone(),
        author: descriptor.author.clone(),
        license: descriptor.license.clone(),
        dependencies: descriptor.dependencies.clone(),
        size,
        package_file: zip_name.clone(),
        install_instructions: format!("Install with: nexus install {zip_name}"),
    };

    let info_path = paths.dist_dir.join(format!("{id}-info.json"));
    let content = serde_json::to_string_pretty(&info).map_err(|source| PluginError::Parse {
        path: info_path.clone(),
        source,
    })?;
    std::fs::write(&info_path, content)?;

    tracing::info!(
        plugin = %id,
        archive = %archive_path.display(),
        size_bytes = size,
        "Plugin packaged"
    );
    Ok(PackedPlugin {
        id: id.to_string(),
        version: descriptor.version,
        archive_path,
        info_path,
        size,
    })
}

/// Pack every plugin directory under the plugins root independently.
///
/// A single failure is recorded in the summary and the batch continues;
/// callers decide what to do with a partially failed run.
pub fn pack_all(paths: &PluginPaths) -> Result<PackSummary, PluginError> {
    let mut summary = PackSummary::default();

    for id in scanner::installed_ids(&paths.plugins_dir) {
        match pack(&id, paths) {
            Ok(_) => summary.packed.push(id),
            Err(e) => {
                tracing::error!(plugin = %id, error = %e, "Failed to pack plugin");
                summary.failed.push((id, e.to_string()));
            }
        }
    }

    tracing::info!(
        packed = summary.packed.len(),
        failed = summary.failed.len(),
        "Pack batch finished"
    );
    Ok(summary)
}
