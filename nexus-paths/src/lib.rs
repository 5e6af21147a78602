//! XDG Base Directory paths for nexus.
//!
//! CLI tools should use XDG paths for cross-platform consistency,
//! not platform-native paths. This matches tools like gh, docker, kubectl.

use std::path::PathBuf;

/// Get the nexus config directory.
///
/// Returns `$XDG_CONFIG_HOME/nexus` if set, otherwise `~/.config/nexus`.
/// This is where the plugins root and the plugin manifest live.
///
/// # Examples
///
/// ```
/// use nexus_paths::config_dir;
///
/// let config = config_dir();
/// let plugins = config.join("plugins");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("nexus")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/nexus")
    } else {
        PathBuf::from(".config/nexus")
    }
}

/// Get the nexus data directory.
///
/// Returns `$XDG_DATA_HOME/nexus` if set, otherwise `~/.local/share/nexus`.
/// Packed plugin archives are written below this directory.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("nexus")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/nexus")
    } else {
        PathBuf::from(".local/share/nexus")
    }
}

/// Default plugins root: `<config_dir>/plugins`.
pub fn plugins_dir() -> PathBuf {
    config_dir().join("plugins")
}

/// Default manifest location: `<config_dir>/plugin-manifest.json`.
pub fn manifest_path() -> PathBuf {
    config_dir().join("plugin-manifest.json")
}

/// Default output directory for packed archives: `<data_dir>/dist`.
pub fn dist_dir() -> PathBuf {
    data_dir().join("dist")
}
