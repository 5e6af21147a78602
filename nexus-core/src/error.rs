//! Plugin lifecycle error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the plugin lifecycle pipeline
#[derive(Error, Debug)]
pub enum PluginError {
    /// No installed plugin directory matches the requested id
    #[error("Plugin '{id}' not found")]
    NotFound {
        id: String,
        /// Ids that do exist under the plugins root, for diagnostics
        available: Vec<String>,
    },

    /// Archive is unusable as a plugin bundle
    #[error("Invalid plugin archive {path}: {reason}")]
    InvalidArchive { path: PathBuf, reason: String },

    /// Descriptor file exists but is malformed
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Persisted manifest file does not exist
    #[error("Plugin manifest not found at {path}")]
    ManifestMissing { path: PathBuf },

    /// Plugin directory exists but carries no descriptor
    #[error("plugin.json not found in plugin '{id}'")]
    DescriptorMissing { id: String },

    /// Plugin content carries no resolvable entry file
    #[error("index.js not found in plugin '{id}'")]
    EntryMissing { id: String },

    /// Best-effort dependency installation failed (logged, non-fatal)
    #[error("Dependency installation failed: {reason}")]
    DependencyInstall { reason: String },

    /// Install source is neither a zip archive nor a directory
    #[error("Unsupported install source: {path}")]
    UnsupportedSource { path: PathBuf },

    /// Zip read/write error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = PluginError::NotFound {
            id: "wiki-plugin".to_string(),
            available: vec!["map-plugin".to_string()],
        };
        assert!(err.to_string().contains("wiki-plugin"));
    }

    #[test]
    fn test_invalid_archive_display() {
        let err = PluginError::InvalidArchive {
            path: PathBuf::from("/tmp/bundle.zip"),
            reason: "no plugin.json found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bundle.zip"));
        assert!(msg.contains("plugin.json"));
    }

    #[test]
    fn test_manifest_missing_display() {
        let err = PluginError::ManifestMissing {
            path: PathBuf::from("/etc/nexus/plugin-manifest.json"),
        };
        assert!(err.to_string().contains("plugin-manifest.json"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PluginError = io_err.into();
        assert!(matches!(err, PluginError::Io(_)));
    }
}
