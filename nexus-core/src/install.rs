//! Installer - ingest a plugin bundle and bring the manifest up to date

use std::path::{Path, PathBuf};

use crate::archive;
use crate::config::PluginPaths;
use crate::deps;
use crate::descriptor::{DESCRIPTOR_FILE, ENTRY_FILE, PluginDescriptor};
use crate::error::PluginError;
use crate::manifest::ManifestStore;
use crate::scanner;

/// Outcome of a successful install.
#[derive(Debug, Clone)]
pub struct InstalledPlugin {
    pub id: String,
    pub name: String,
    pub version: String,
    /// Final plugin directory under the plugins root
    pub path: PathBuf,
}

/// Install a plugin from a zip archive or a directory.
///
/// The source is staged into a temporary directory inside the plugins root,
/// validated there, and only then swapped into place with a rename, so an
/// existing install of the same id is either fully replaced or left intact.
/// Dependency installation is best-effort: a failure is logged and the
/// install still succeeds. The manifest is rebuilt from a full rescan, never
/// patched.
pub fn install(source: &Path, paths: &PluginPaths) -> Result<InstalledPlugin, PluginError> {
    if !source.exists() {
        return Err(PluginError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("install source not found: {}", source.display()),
        )));
    }

    std::fs::create_dir_all(&paths.plugins_dir)?;

    let is_archive = source.is_file()
        && source
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    let id = if is_archive {
        archive::read_descriptor(source)?.declared_id().to_string()
    } else if source.is_dir() {
        source
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| PluginError::UnsupportedSource {
                path: source.to_path_buf(),
            })?
    } else {
        return Err(PluginError::UnsupportedSource {
            path: source.to_path_buf(),
        });
    };

    tracing::info!(plugin = %id, source = %source.display(), "Installing plugin");

    // Stage inside the plugins root so the final rename stays on one
    // filesystem. The dot prefix keeps the scanner from seeing it.
    let staging = tempfile::Builder::new()
        .prefix(".install-")
        .tempdir_in(&paths.plugins_dir)?;

    if is_archive {
        archive::extract(source, staging.path())?;
    } else {
        copy_dir_recursive(source, staging.path())?;
    }

    let descriptor = validate_staged(staging.path(), &id)?;

    let dest = paths.plugin_dir(&id);
    swap_into_place(staging.path(), &dest, &paths.plugins_dir, &id)?;

    if let Err(e) = deps::install_dependencies(&dest) {
        tracing::warn!(plugin = %id, error = %e, "Dependency installation failed, continuing");
    }

    let manifest = scanner::scan(&paths.plugins_dir)?;
    ManifestStore::save(&paths.manifest_path, &manifest)?;

    tracing::info!(plugin = %id, path = %dest.display(), "Plugin installed");
    Ok(InstalledPlugin {
        id,
        name: descriptor.name,
        version: descriptor.version,
        path: dest,
    })
}

/// Check the staged tree holds a parseable descriptor and an entry file.
fn validate_staged(staged: &Path, id: &str) -> Result<PluginDescriptor, PluginError> {
    if !staged.join(DESCRIPTOR_FILE).exists() {
        return Err(PluginError::DescriptorMissing { id: id.to_string() });
    }
    let descriptor = PluginDescriptor::read_from_dir(staged)?;
    if !staged.join(ENTRY_FILE).exists() {
        return Err(PluginError::EntryMissing { id: id.to_string() });
    }
    Ok(descriptor)
}

/// Swap validated staged content into `dest` with renames.
///
/// Any previous version is parked under a dot-prefixed sibling until the
/// swap commits; if the final rename fails it is renamed back.
fn swap_into_place(
    staged: &Path,
    dest: &Path,
    plugins_dir: &Path,
    id: &str,
) -> Result<(), PluginError> {
    let backup = plugins_dir.join(format!(".{id}.previous"));
    if backup.exists() {
        std::fs::remove_dir_all(&backup)?;
    }

    let had_previous = dest.exists();
    if had_previous {
        std::fs::rename(dest, &backup)?;
    }

    match std::fs::rename(staged, dest) {
        Ok(()) => {
            if had_previous {
                if let Err(e) = std::fs::remove_dir_all(&backup) {
                    tracing::warn!(plugin = %id, error = %e, "Failed to drop previous version");
                }
            }
            Ok(())
        }
        Err(e) => {
            if had_previous {
                let _ = std::fs::rename(&backup, dest);
            }
            Err(e.into())
        }
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), PluginError> {
    std::fs::create_dir_all(dst)?;
    for entry in walkdir::WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path == src {
            continue;
        }
        let Ok(rel) = path.strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(path, &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn build_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_install_from_zip_derives_id_from_descriptor() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let zip_path = dir.path().join("bundle.zip");
        build_zip(
            &zip_path,
            &[
                (
                    "plugin.json",
                    r#"{"id": "wiki-plugin", "name": "Wiki", "version": "2.0.0"}"#,
                ),
                ("index.js", "export default {};"),
            ],
        );

        let installed = install(&zip_path, &paths).unwrap();
        assert_eq!(installed.id, "wiki-plugin");
        assert_eq!(installed.name, "Wiki");
        assert_eq!(installed.version, "2.0.0");
        assert!(paths.plugin_dir("wiki-plugin").join("plugin.json").exists());

        let manifest = ManifestStore::load(&paths.manifest_path).unwrap();
        let entry = manifest.get("wiki-plugin").unwrap();
        assert_eq!(entry.version, "2.0.0");
        assert_eq!(entry.path, "plugins/wiki-plugin/index.js");
    }

    #[test]
    fn test_install_from_wrapped_zip_flattens() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let zip_path = dir.path().join("bundle.zip");
        build_zip(
            &zip_path,
            &[
                ("wiki-plugin/plugin.json", r#"{"id": "wiki-plugin", "name": "Wiki"}"#),
                ("wiki-plugin/index.js", "export default {};"),
            ],
        );

        install(&zip_path, &paths).unwrap();
        let dest = paths.plugin_dir("wiki-plugin");
        assert!(dest.join("plugin.json").exists());
        assert!(!dest.join("wiki-plugin").exists());
    }

    #[test]
    fn test_install_from_directory_uses_base_name() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let src = dir.path().join("map-plugin");
        std::fs::create_dir_all(src.join("lib")).unwrap();
        std::fs::write(src.join("plugin.json"), r#"{"name": "Map"}"#).unwrap();
        std::fs::write(src.join("index.js"), "export default {};").unwrap();
        std::fs::write(src.join("lib/util.js"), "export const x = 1;").unwrap();

        let installed = install(&src, &paths).unwrap();
        assert_eq!(installed.id, "map-plugin");
        assert!(paths.plugin_dir("map-plugin").join("lib/util.js").exists());

        let manifest = ManifestStore::load(&paths.manifest_path).unwrap();
        assert!(manifest.get("map-plugin").is_some());
    }

    #[test]
    fn test_install_overwrite_replaces_all_previous_content() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());

        let src = dir.path().join("wiki-plugin");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("plugin.json"), r#"{"name": "Wiki"}"#).unwrap();
        std::fs::write(src.join("index.js"), "export default {};").unwrap();
        std::fs::write(src.join("stale.js"), "old file").unwrap();
        install(&src, &paths).unwrap();

        std::fs::remove_file(src.join("stale.js")).unwrap();
        std::fs::write(src.join("fresh.js"), "new file").unwrap();
        install(&src, &paths).unwrap();

        let dest = paths.plugin_dir("wiki-plugin");
        assert!(!dest.join("stale.js").exists());
        assert!(dest.join("fresh.js").exists());
    }

    #[test]
    fn test_install_zip_without_descriptor_fails_and_keeps_root_clean() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let zip_path = dir.path().join("bundle.zip");
        build_zip(&zip_path, &[("index.js", "export default {};")]);

        let result = install(&zip_path, &paths);
        assert!(matches!(result, Err(PluginError::InvalidArchive { .. })));
        assert_eq!(scanner::installed_ids(&paths.plugins_dir), Vec::<String>::new());
    }

    #[test]
    fn test_install_directory_without_entry_fails_without_mutating_dest() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let src = dir.path().join("broken-plugin");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("plugin.json"), r#"{"name": "Broken"}"#).unwrap();

        let result = install(&src, &paths);
        assert!(matches!(result, Err(PluginError::EntryMissing { .. })));
        assert!(!paths.plugin_dir("broken-plugin").exists());
    }

    #[test]
    fn test_install_unsupported_source() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());
        let src = dir.path().join("plugin.tar.gz");
        std::fs::write(&src, "not a zip").unwrap();

        let result = install(&src, &paths);
        assert!(matches!(result, Err(PluginError::UnsupportedSource { .. })));
    }

    #[test]
    fn test_install_missing_source() {
        let dir = TempDir::new().unwrap();
        let paths = PluginPaths::under(dir.path());

        let result = install(&dir.path().join("nope.zip"), &paths);
        assert!(matches!(result, Err(PluginError::Io(_))));
    }
}
