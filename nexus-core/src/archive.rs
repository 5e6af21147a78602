//! Archive handling - extraction and creation of plugin zip bundles

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::descriptor::{DESCRIPTOR_FILE, PluginDescriptor};
use crate::error::PluginError;

/// Directory and file names excluded from packed archives.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", ".DS_Store"];

/// Read and parse the first descriptor file found inside a zip bundle.
///
/// The descriptor may sit at any depth; archives built with a wrapper
/// directory still resolve. Fails with `InvalidArchive` when no descriptor
/// exists anywhere in the tree.
pub fn read_descriptor(archive_path: &Path) -> Result<PluginDescriptor, PluginError> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(name) = entry.enclosed_name() else {
            continue;
        };
        if name.file_name().and_then(|n| n.to_str()) != Some(DESCRIPTOR_FILE) {
            continue;
        }

        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        let logical_path = archive_path.join(name);
        return PluginDescriptor::parse(&content, &logical_path);
    }

    Err(PluginError::InvalidArchive {
        path: archive_path.to_path_buf(),
        reason: format!("no {DESCRIPTOR_FILE} found"),
    })
}

/// Extract a plugin bundle into `dest`, then flatten a single wrapper
/// directory if the archive was built with one.
///
/// Entry paths are validated before anything touches disk: absolute paths
/// and parent-directory traversal reject the whole archive. Extraction is
/// not transactional - a mid-stream failure leaves partial state in `dest`,
/// which is why the installer extracts into a staging directory.
pub fn extract(archive_path: &Path, dest: &Path) -> Result<(), PluginError> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut has_descriptor = false;
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let Some(name) = entry.enclosed_name() else {
            return Err(PluginError::InvalidArchive {
                path: archive_path.to_path_buf(),
                reason: format!("unsafe entry path: {}", entry.name()),
            });
        };
        if name.file_name().and_then(|n| n.to_str()) == Some(DESCRIPTOR_FILE) {
            has_descriptor = true;
        }
    }
    if !has_descriptor {
        return Err(PluginError::InvalidArchive {
            path: archive_path.to_path_buf(),
            reason: format!("no {DESCRIPTOR_FILE} found"),
        });
    }

    std::fs::create_dir_all(dest)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        // Validated above; entries without an enclosed name are unreachable.
        let Some(name) = entry.enclosed_name() else {
            continue;
        };
        let out_path = dest.join(name);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        std::io::copy(&mut entry, &mut out)?;
    }

    flatten_single_wrapper(dest)?;
    Ok(())
}

/// Collapse a single redundant top-level wrapper directory.
///
/// Some archiving tools wrap the plugin in one top-level folder; after
/// extraction, if `dest` contains exactly one entry and it is a directory,
/// its contents move up one level and the wrapper is removed.
fn flatten_single_wrapper(dest: &Path) -> Result<(), PluginError> {
    let entries: Vec<PathBuf> = std::fs::read_dir(dest)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    let [wrapper] = entries.as_slice() else {
        return Ok(());
    };
    if !wrapper.is_dir() {
        return Ok(());
    }

    // Park the wrapper under a temporary name first so a child with the
    // same name as the wrapper cannot collide during the moves.
    let parked = dest.join(".flatten");
    std::fs::rename(wrapper, &parked)?;
    for child in std::fs::read_dir(&parked)? {
        let child = child?;
        std::fs::rename(child.path(), dest.join(child.file_name()))?;
    }
    std::fs::remove_dir(&parked)?;

    tracing::debug!(dir = %dest.display(), "Flattened single wrapper directory");
    Ok(())
}

/// Create a zip bundle of `source_dir` at `dest_zip`.
///
/// Entries are prefixed with `root_name/` so the produced archive carries
/// the single wrapper directory the extractor knows how to flatten.
/// Deflate at maximum compression; names in `exclude` are dropped wherever
/// they appear in the tree. Returns the byte size of the finished archive.
pub fn create(
    source_dir: &Path,
    dest_zip: &Path,
    root_name: &str,
    exclude: &[&str],
) -> Result<u64, PluginError> {
    if let Some(parent) = dest_zip.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(dest_zip)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(9));

    for entry in walkdir::WalkDir::new(source_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path == source_dir {
            continue;
        }
        let rel = match path.strip_prefix(source_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if rel
            .components()
            .any(|c| exclude.contains(&c.as_os_str().to_string_lossy().as_ref()))
        {
            continue;
        }

        let mut name = String::from(root_name);
        for component in rel.components() {
            name.push('/');
            name.push_str(&component.as_os_str().to_string_lossy());
        }

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            let content = std::fs::read(path)?;
            writer.write_all(&content)?;
        }
    }

    let file = writer.finish()?;
    Ok(file.metadata()?.len())
}
