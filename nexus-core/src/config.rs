//! Filesystem locations the lifecycle pipeline operates on

use std::path::PathBuf;

/// Paths for the plugin lifecycle pipeline.
///
/// The default points at the XDG locations from `nexus-paths`; tests and
/// embedders construct their own to point everything at a scratch directory.
#[derive(Debug, Clone)]
pub struct PluginPaths {
    /// Root directory holding one subdirectory per installed plugin
    pub plugins_dir: PathBuf,
    /// Persisted manifest file
    pub manifest_path: PathBuf,
    /// Output directory for packed archives and sidecars
    pub dist_dir: PathBuf,
}

impl Default for PluginPaths {
    fn default() -> Self {
        Self {
            plugins_dir: nexus_paths::plugins_dir(),
            manifest_path: nexus_paths::manifest_path(),
            dist_dir: nexus_paths::dist_dir(),
        }
    }
}

impl PluginPaths {
    /// Paths rooted below a single base directory. Used by tests and by
    /// hosts that bundle plugins next to the application.
    pub fn under(base: &std::path::Path) -> Self {
        Self {
            plugins_dir: base.join("plugins"),
            manifest_path: base.join("plugin-manifest.json"),
            dist_dir: base.join("dist"),
        }
    }

    /// Directory of an installed plugin by id.
    pub fn plugin_dir(&self, id: &str) -> PathBuf {
        self.plugins_dir.join(id)
    }

    /// The loader resolution root: entry paths in the manifest are recorded
    /// relative to this directory.
    pub fn resolution_root(&self) -> &std::path::Path {
        self.plugins_dir.parent().unwrap_or(&self.plugins_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths_use_xdg_dirs() {
        let paths = PluginPaths::default();
        assert!(paths.plugins_dir.ends_with("plugins"));
        assert!(paths.manifest_path.ends_with("plugin-manifest.json"));
    }

    #[test]
    fn test_under_roots_everything_below_base() {
        let paths = PluginPaths::under(Path::new("/base"));
        assert_eq!(paths.plugins_dir, Path::new("/base/plugins"));
        assert_eq!(paths.manifest_path, Path::new("/base/plugin-manifest.json"));
        assert_eq!(paths.dist_dir, Path::new("/base/dist"));
    }

    #[test]
    fn test_resolution_root_is_plugins_parent() {
        let paths = PluginPaths::under(Path::new("/base"));
        assert_eq!(paths.resolution_root(), Path::new("/base"));
    }
}
